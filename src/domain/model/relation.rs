use serde::{Deserialize, Serialize};

/// Membership of one user in one group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupRelation {
    pub user_id: String,
    pub group_id: String,
}

impl UserGroupRelation {
    pub fn new(user_id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            group_id: group_id.into(),
        }
    }
}
