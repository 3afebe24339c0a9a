use crate::application::outcome::ServiceResult;
use crate::domain::model::{Group, GroupInput, GroupWithUsers, User, UserGroupRelation};
use crate::domain::repository::{
    GroupRepository, Result, UnitOfWork, UserGroupRepository, UserRepository,
};

/// Filters accepted by [`GroupsService::exists_by_params`]. The variant picks the table.
#[derive(Debug, Clone, Copy)]
pub enum Params<'a> {
    GroupName(&'a str),
    Relation { user_id: &'a str, group_id: &'a str },
}

/// Tables addressable by [`GroupsService::exists_by_id`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Group,
    /// Group row plus its members projected to `login, age, id`
    GroupWithUsers,
    User,
}

/// A row found by one of the existence helpers
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Group(Group),
    GroupWithUsers(GroupWithUsers),
    User(User),
    Relation(UserGroupRelation),
}

/// Group CRUD and membership management.
///
/// Every public operation returns a [`ServiceResult`]; storage errors are logged
/// and reported as `SOMETHING_WENT_WRONG`, never returned to the caller.
///
/// Name uniqueness and relation uniqueness are checked with a read before the
/// write, so concurrent callers may both pass the check.
pub struct GroupsService<G, U, M, W> {
    groups: G,
    users: U,
    user_group: M,
    unit_of_work: W,
}

impl<G, U, M, W> GroupsService<G, U, M, W>
where
    G: GroupRepository,
    U: UserRepository,
    M: UserGroupRepository,
    W: UnitOfWork,
{
    pub fn new(groups: G, users: U, user_group: M, unit_of_work: W) -> Self {
        Self {
            groups,
            users,
            user_group,
            unit_of_work,
        }
    }

    pub fn exists_by_params(&self, params: Params<'_>) -> Result<Option<Record>> {
        let record = match params {
            Params::GroupName(name) => self.groups.find_by_name(name)?.map(Record::Group),
            Params::Relation { user_id, group_id } => self
                .user_group
                .find(user_id, group_id)?
                .map(Record::Relation),
        };
        Ok(record)
    }

    pub fn exists_by_id(&self, id: &str, target: Target) -> Result<Option<Record>> {
        let record = match target {
            Target::Group => self.groups.find_by_id(id)?.map(Record::Group),
            Target::GroupWithUsers => self.groups.find_with_users(id)?.map(Record::GroupWithUsers),
            Target::User => self.users.find_by_id(id)?.map(Record::User),
        };
        Ok(record)
    }

    pub fn add(&self, input: GroupInput) -> ServiceResult<Group> {
        settle("add", self.try_add(input))
    }

    fn try_add(&self, input: GroupInput) -> Result<ServiceResult<Group>> {
        if self.exists_by_params(Params::GroupName(&input.name))?.is_some() {
            return Ok(ServiceResult::bad_data("Name exists"));
        }

        let group = Group::from(input);
        self.groups.create(&group)?;
        tracing::info!("Created group {} ({})", group.name, group.id);

        Ok(ServiceResult::ok_with(group))
    }

    pub fn update(&self, id: &str, input: &GroupInput) -> ServiceResult {
        settle("update", self.try_update(id, input))
    }

    fn try_update(&self, id: &str, input: &GroupInput) -> Result<ServiceResult> {
        if self.exists_by_id(id, Target::Group)?.is_none() {
            return Ok(ServiceResult::not_found("Group not found"));
        }

        self.groups.update(id, input)?;
        tracing::info!("Updated group {}", id);

        Ok(ServiceResult::ok())
    }

    /// Delete a group and all of its memberships in one transaction
    pub fn delete(&self, id: &str) -> ServiceResult {
        settle("delete", self.try_delete(id))
    }

    fn try_delete(&self, id: &str) -> Result<ServiceResult> {
        if self.exists_by_id(id, Target::Group)?.is_none() {
            return Ok(ServiceResult::not_found("Group not found"));
        }

        let mut relations_removed = 0;
        self.unit_of_work.transaction(&mut |scope| {
            scope.destroy_group(id)?;
            relations_removed = scope.destroy_relations_of_group(id)?;
            Ok(())
        })?;
        tracing::info!("Deleted group {} and {} membership(s)", id, relations_removed);

        Ok(ServiceResult::ok())
    }

    pub fn add_user_to_group(&self, relation: &UserGroupRelation) -> ServiceResult {
        settle("add_user_to_group", self.try_add_user_to_group(relation))
    }

    fn try_add_user_to_group(&self, relation: &UserGroupRelation) -> Result<ServiceResult> {
        let user = self.exists_by_id(&relation.user_id, Target::User)?;
        let group = self.exists_by_id(&relation.group_id, Target::Group)?;

        let result = match (user.is_some(), group.is_some()) {
            (true, true) => {
                let existing = self.exists_by_params(Params::Relation {
                    user_id: &relation.user_id,
                    group_id: &relation.group_id,
                })?;
                if existing.is_some() {
                    return Ok(ServiceResult::bad_data("User is in group already"));
                }

                self.user_group.create(relation)?;
                tracing::info!(
                    "Added user {} to group {}",
                    relation.user_id,
                    relation.group_id
                );
                ServiceResult::ok()
            }
            (true, false) => ServiceResult::not_found("Group not found"),
            (false, true) => ServiceResult::not_found("User not found"),
            (false, false) => ServiceResult::not_found("User and Group not found"),
        };

        Ok(result)
    }

    pub fn get_by_id(&self, id: &str) -> ServiceResult<GroupWithUsers> {
        settle("get_by_id", self.try_get_by_id(id))
    }

    fn try_get_by_id(&self, id: &str) -> Result<ServiceResult<GroupWithUsers>> {
        match self.groups.find_with_users(id)? {
            Some(group) => Ok(ServiceResult::ok_with(group)),
            None => Ok(ServiceResult::not_found("Group not found")),
        }
    }

    pub fn get(&self) -> ServiceResult<Vec<GroupWithUsers>> {
        settle("get", self.groups.find_all_with_users().map(ServiceResult::ok_with))
    }
}

/// Collapse a storage error into the generic failure result
fn settle<T>(operation: &str, outcome: Result<ServiceResult<T>>) -> ServiceResult<T> {
    outcome.unwrap_or_else(|e| {
        tracing::error!("Groups service {} failed: {}", operation, e);
        ServiceResult::something_went_wrong()
    })
}
