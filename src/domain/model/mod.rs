mod group;
mod relation;
mod user;

pub use group::{Group, GroupInput, GroupWithUsers};
pub use relation::UserGroupRelation;
pub use user::{User, UserSummary};
