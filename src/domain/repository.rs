use crate::domain::error::DomainError;
use crate::domain::model::{Group, GroupInput, GroupWithUsers, User, UserGroupRelation};

pub type Result<T> = std::result::Result<T, DomainError>;

/// Repository trait for Group entity
pub trait GroupRepository: Send + Sync {
    fn find_by_id(&self, id: &str) -> Result<Option<Group>>;
    fn find_by_name(&self, name: &str) -> Result<Option<Group>>;
    /// Group with its members, projected to `login, age, id`
    fn find_with_users(&self, id: &str) -> Result<Option<GroupWithUsers>>;
    fn find_all_with_users(&self) -> Result<Vec<GroupWithUsers>>;
    fn create(&self, group: &Group) -> Result<()>;
    /// Returns the number of rows changed
    fn update(&self, id: &str, input: &GroupInput) -> Result<usize>;
}

/// Repository trait for User entity
pub trait UserRepository: Send + Sync {
    fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    fn create(&self, user: &User) -> Result<()>;
}

/// Repository trait for the user/group join table
pub trait UserGroupRepository: Send + Sync {
    fn find(&self, user_id: &str, group_id: &str) -> Result<Option<UserGroupRelation>>;
    fn find_by_group(&self, group_id: &str) -> Result<Vec<UserGroupRelation>>;
    fn create(&self, relation: &UserGroupRelation) -> Result<()>;
}

/// Writes available inside a transaction
pub trait TransactionScope {
    fn destroy_group(&self, id: &str) -> Result<usize>;
    fn destroy_relations_of_group(&self, group_id: &str) -> Result<usize>;
}

/// Runs a batch of writes atomically.
///
/// `work` sees a [`TransactionScope`]; the transaction commits only when `work`
/// returns `Ok`, and is rolled back on every other path.
pub trait UnitOfWork: Send + Sync {
    fn transaction(&self, work: &mut dyn FnMut(&dyn TransactionScope) -> Result<()>) -> Result<()>;
}

// Implement GroupRepository for Box<dyn GroupRepository> to allow dynamic dispatch
impl GroupRepository for Box<dyn GroupRepository> {
    fn find_by_id(&self, id: &str) -> Result<Option<Group>> {
        (**self).find_by_id(id)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Group>> {
        (**self).find_by_name(name)
    }

    fn find_with_users(&self, id: &str) -> Result<Option<GroupWithUsers>> {
        (**self).find_with_users(id)
    }

    fn find_all_with_users(&self) -> Result<Vec<GroupWithUsers>> {
        (**self).find_all_with_users()
    }

    fn create(&self, group: &Group) -> Result<()> {
        (**self).create(group)
    }

    fn update(&self, id: &str, input: &GroupInput) -> Result<usize> {
        (**self).update(id, input)
    }
}

// Implement UserRepository for Box<dyn UserRepository> to allow dynamic dispatch
impl UserRepository for Box<dyn UserRepository> {
    fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        (**self).find_by_id(id)
    }

    fn create(&self, user: &User) -> Result<()> {
        (**self).create(user)
    }
}

// Implement UserGroupRepository for Box<dyn UserGroupRepository> to allow dynamic dispatch
impl UserGroupRepository for Box<dyn UserGroupRepository> {
    fn find(&self, user_id: &str, group_id: &str) -> Result<Option<UserGroupRelation>> {
        (**self).find(user_id, group_id)
    }

    fn find_by_group(&self, group_id: &str) -> Result<Vec<UserGroupRelation>> {
        (**self).find_by_group(group_id)
    }

    fn create(&self, relation: &UserGroupRelation) -> Result<()> {
        (**self).create(relation)
    }
}

impl UnitOfWork for Box<dyn UnitOfWork> {
    fn transaction(&self, work: &mut dyn FnMut(&dyn TransactionScope) -> Result<()>) -> Result<()> {
        (**self).transaction(work)
    }
}
