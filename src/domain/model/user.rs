use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// User entity. Users are owned by a separate service; groups only reference them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub login: String,
    pub age: i32,
}

impl User {
    pub fn new(login: String, age: i32) -> Self {
        Self {
            id: Ulid::new().to_string(),
            login,
            age,
        }
    }
}

/// The only user fields exposed when users are nested under a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub login: String,
    pub age: i32,
    pub id: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            login: user.login,
            age: user.age,
            id: user.id,
        }
    }
}
