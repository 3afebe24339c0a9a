use crate::domain::model::{Group, GroupInput, GroupWithUsers, UserSummary};
use crate::domain::repository::{GroupRepository, Result};
use super::schema::Association;
use super::{lock, DbConnection};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;

pub struct SqliteGroupRepository {
    conn: DbConnection,
    association: Association,
}

impl SqliteGroupRepository {
    pub fn new(conn: DbConnection, association: Association) -> Self {
        Self { conn, association }
    }

    fn find_one(&self, sql: &str, value: &str) -> Result<Option<Group>> {
        let conn = lock(&self.conn)?;

        let raw = conn
            .query_row(sql, params![value], RawGroup::from_row)
            .optional()?;

        raw.map(RawGroup::into_group).transpose()
    }

    fn members_of(&self, conn: &Connection, group_id: &str) -> Result<Vec<UserSummary>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT DISTINCT u.login, u.age, u.id
             FROM {through} r JOIN users u ON u.id = r.{ok}
             WHERE r.{fk} = ?
             ORDER BY u.id ASC",
            through = self.association.through,
            fk = self.association.foreign_key,
            ok = self.association.other_key,
        ))?;

        let rows = stmt.query_map(params![group_id], |row| {
            Ok(UserSummary {
                login: row.get(0)?,
                age: row.get(1)?,
                id: row.get(2)?,
            })
        })?;

        let mut users = Vec::new();
        for user in rows {
            users.push(user?);
        }

        Ok(users)
    }
}

/// Group row before the permissions column is decoded
struct RawGroup {
    id: String,
    name: String,
    permissions: String,
}

impl RawGroup {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            permissions: row.get(2)?,
        })
    }

    fn into_group(self) -> Result<Group> {
        Ok(Group {
            id: self.id,
            name: self.name,
            permissions: serde_json::from_str(&self.permissions)?,
        })
    }
}

impl GroupRepository for SqliteGroupRepository {
    fn find_by_id(&self, id: &str) -> Result<Option<Group>> {
        self.find_one("SELECT id, name, permissions FROM groups WHERE id = ?", id)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Group>> {
        self.find_one(
            "SELECT id, name, permissions FROM groups WHERE name = ? ORDER BY id ASC LIMIT 1",
            name,
        )
    }

    fn find_with_users(&self, id: &str) -> Result<Option<GroupWithUsers>> {
        let conn = lock(&self.conn)?;

        let raw = conn
            .query_row(
                "SELECT id, name, permissions FROM groups WHERE id = ?",
                params![id],
                RawGroup::from_row,
            )
            .optional()?;

        let group = match raw {
            Some(raw) => raw.into_group()?,
            None => return Ok(None),
        };

        let users = self.members_of(&conn, &group.id)?;

        Ok(Some(GroupWithUsers { group, users }))
    }

    fn find_all_with_users(&self) -> Result<Vec<GroupWithUsers>> {
        let conn = lock(&self.conn)?;

        let mut stmt = conn.prepare("SELECT id, name, permissions FROM groups ORDER BY id ASC")?;
        let rows = stmt.query_map([], RawGroup::from_row)?;

        let mut groups = Vec::new();
        for raw in rows {
            groups.push(raw?.into_group()?);
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT DISTINCT r.{fk}, u.login, u.age, u.id
             FROM {through} r JOIN users u ON u.id = r.{ok}
             ORDER BY u.id ASC",
            through = self.association.through,
            fk = self.association.foreign_key,
            ok = self.association.other_key,
        ))?;

        let rows = stmt.query_map([], |row| {
            let group_id: String = row.get(0)?;
            let user = UserSummary {
                login: row.get(1)?,
                age: row.get(2)?,
                id: row.get(3)?,
            };
            Ok((group_id, user))
        })?;

        let mut members: HashMap<String, Vec<UserSummary>> = HashMap::new();
        for row in rows {
            let (group_id, user) = row?;
            members.entry(group_id).or_default().push(user);
        }

        Ok(groups
            .into_iter()
            .map(|group| {
                let users = members.remove(&group.id).unwrap_or_default();
                GroupWithUsers { group, users }
            })
            .collect())
    }

    fn create(&self, group: &Group) -> Result<()> {
        let conn = lock(&self.conn)?;

        let permissions_json = serde_json::to_string(&group.permissions)?;

        conn.execute(
            "INSERT INTO groups (id, name, permissions) VALUES (?, ?, ?)",
            params![group.id, group.name, permissions_json],
        )?;

        Ok(())
    }

    fn update(&self, id: &str, input: &GroupInput) -> Result<usize> {
        let conn = lock(&self.conn)?;

        let permissions_json = serde_json::to_string(&input.permissions)?;

        let changed = conn.execute(
            "UPDATE groups SET name = ?, permissions = ? WHERE id = ?",
            params![input.name, permissions_json, id],
        )?;

        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::User;
    use crate::infrastructure::persistence::sqlite::{migrate_shared, open_in_memory};
    use serde_json::json;

    fn setup() -> (SqliteGroupRepository, DbConnection) {
        let conn = open_in_memory().unwrap();
        migrate_shared(&conn, &Association::default()).unwrap();
        (SqliteGroupRepository::new(conn.clone(), Association::default()), conn)
    }

    fn insert_user(conn: &DbConnection, user: &User) {
        conn.lock()
            .unwrap()
            .execute(
                "INSERT INTO users (id, login, age) VALUES (?, ?, ?)",
                params![user.id, user.login, user.age],
            )
            .unwrap();
    }

    fn link(conn: &DbConnection, user_id: &str, group_id: &str) {
        conn.lock()
            .unwrap()
            .execute(
                "INSERT INTO user_group_relations (user_id, group_id) VALUES (?, ?)",
                params![user_id, group_id],
            )
            .unwrap();
    }

    #[test]
    fn test_create_and_find() {
        let (repo, _conn) = setup();
        let group = Group::new("Admins".to_string(), json!({"read": true, "write": ["docs"]}));
        repo.create(&group).unwrap();

        assert_eq!(repo.find_by_id(&group.id).unwrap(), Some(group.clone()));
        assert_eq!(repo.find_by_name("Admins").unwrap(), Some(group));
        assert!(repo.find_by_name("admins").unwrap().is_none());
        assert!(repo.find_by_id("missing").unwrap().is_none());
    }

    #[test]
    fn test_update_reports_changed_rows() {
        let (repo, _conn) = setup();
        let group = Group::new("Admins".to_string(), json!([]));
        repo.create(&group).unwrap();

        let input = GroupInput {
            name: "Owners".to_string(),
            permissions: json!(["all"]),
        };
        assert_eq!(repo.update(&group.id, &input).unwrap(), 1);
        assert_eq!(repo.update("missing", &input).unwrap(), 0);

        let stored = repo.find_by_id(&group.id).unwrap().unwrap();
        assert_eq!(stored.name, "Owners");
        assert_eq!(stored.permissions, json!(["all"]));
    }

    #[test]
    fn test_find_with_users_projects_members() {
        let (repo, conn) = setup();
        let group = Group::new("Admins".to_string(), json!({}));
        repo.create(&group).unwrap();
        let alice = User::new("alice".to_string(), 31);
        let bob = User::new("bob".to_string(), 27);
        insert_user(&conn, &alice);
        insert_user(&conn, &bob);
        link(&conn, &alice.id, &group.id);

        let found = repo.find_with_users(&group.id).unwrap().unwrap();
        assert_eq!(found.group, group);
        assert_eq!(found.users, vec![UserSummary::from(alice)]);
    }

    #[test]
    fn test_find_all_with_users_buckets_members() {
        let (repo, conn) = setup();
        let admins = Group::new("Admins".to_string(), json!({}));
        let guests = Group::new("Guests".to_string(), json!({}));
        repo.create(&admins).unwrap();
        repo.create(&guests).unwrap();
        let alice = User::new("alice".to_string(), 31);
        let bob = User::new("bob".to_string(), 27);
        insert_user(&conn, &alice);
        insert_user(&conn, &bob);
        link(&conn, &alice.id, &admins.id);
        link(&conn, &bob.id, &admins.id);
        // dangling relation rows are not reported
        link(&conn, "ghost", &guests.id);

        let all = repo.find_all_with_users().unwrap();
        assert_eq!(all.len(), 2);

        let admins_found = all.iter().find(|g| g.group.id == admins.id).unwrap();
        let mut logins: Vec<_> = admins_found.users.iter().map(|u| u.login.as_str()).collect();
        logins.sort();
        assert_eq!(logins, vec!["alice", "bob"]);

        let guests_found = all.iter().find(|g| g.group.id == guests.id).unwrap();
        assert!(guests_found.users.is_empty());
    }

    #[test]
    fn test_corrupt_permissions_is_an_error() {
        let (repo, conn) = setup();
        conn.lock()
            .unwrap()
            .execute(
                "INSERT INTO groups (id, name, permissions) VALUES ('g1', 'Broken', 'not json')",
                [],
            )
            .unwrap();

        assert!(repo.find_by_id("g1").is_err());
    }
}
