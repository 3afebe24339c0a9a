use serde::{Deserialize, Serialize};
use serde_json::Value;
use ulid::Ulid;

use super::UserSummary;

/// Group entity - a named set of permissions shared by its member users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Opaque to this service; stored as JSON text
    pub permissions: Value,
}

impl Group {
    pub fn new(name: String, permissions: Value) -> Self {
        Self {
            id: Ulid::new().to_string(),
            name,
            permissions,
        }
    }
}

/// Caller-supplied attributes for creating or updating a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInput {
    pub name: String,
    #[serde(default)]
    pub permissions: Value,
}

impl From<GroupInput> for Group {
    fn from(input: GroupInput) -> Self {
        Group::new(input.name, input.permissions)
    }
}

/// Group together with the projection of its member users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupWithUsers {
    #[serde(flatten)]
    pub group: Group,
    pub users: Vec<UserSummary>,
}
