use crate::application::service::GroupsService;
use crate::domain::repository::{GroupRepository, UnitOfWork, UserGroupRepository, UserRepository};
use crate::infrastructure::persistence::sqlite::SqliteStorage;

/// Type aliases for dynamic repository types
pub type DynGroupRepository = Box<dyn GroupRepository>;
pub type DynUserRepository = Box<dyn UserRepository>;
pub type DynUserGroupRepository = Box<dyn UserGroupRepository>;
pub type DynUnitOfWork = Box<dyn UnitOfWork>;

pub type DynGroupsService =
    GroupsService<DynGroupRepository, DynUserRepository, DynUserGroupRepository, DynUnitOfWork>;

pub struct AppState {
    pub groups_service: DynGroupsService,
}

impl AppState {
    pub fn new(storage: SqliteStorage) -> Self {
        let groups: DynGroupRepository = Box::new(storage.groups);
        let users: DynUserRepository = Box::new(storage.users);
        let user_group: DynUserGroupRepository = Box::new(storage.user_group);
        let unit_of_work: DynUnitOfWork = Box::new(storage.unit_of_work);

        Self {
            groups_service: GroupsService::new(groups, users, user_group, unit_of_work),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::outcome::ResultCode;
    use crate::domain::model::GroupInput;
    use crate::infrastructure::persistence::sqlite::{migrate_shared, open_in_memory, Association};

    #[test]
    fn test_dynamic_service_round_trip() {
        let conn = open_in_memory().unwrap();
        migrate_shared(&conn, &Association::default()).unwrap();
        let state = AppState::new(SqliteStorage::new(conn, Association::default()).unwrap());

        let created = state.groups_service.add(GroupInput {
            name: "Admins".to_string(),
            permissions: serde_json::json!({"read": true}),
        });
        assert!(created.success);

        let all = state.groups_service.get();
        assert_eq!(all.code, ResultCode::Success);
        assert_eq!(all.data.unwrap().len(), 1);

        let id = created.data.unwrap().id;
        assert!(state.groups_service.delete(&id).success);
        assert_eq!(state.groups_service.get_by_id(&id).code, ResultCode::NotFound);
    }
}
