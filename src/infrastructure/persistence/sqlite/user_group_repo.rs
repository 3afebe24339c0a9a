use crate::domain::model::UserGroupRelation;
use crate::domain::repository::{Result, UserGroupRepository};
use super::schema::Association;
use super::{lock, DbConnection};
use rusqlite::{params, OptionalExtension};

pub struct SqliteUserGroupRepository {
    conn: DbConnection,
    association: Association,
}

impl SqliteUserGroupRepository {
    pub fn new(conn: DbConnection, association: Association) -> Self {
        Self { conn, association }
    }
}

impl UserGroupRepository for SqliteUserGroupRepository {
    fn find(&self, user_id: &str, group_id: &str) -> Result<Option<UserGroupRelation>> {
        let conn = lock(&self.conn)?;

        let sql = format!(
            "SELECT {ok}, {fk} FROM {through} WHERE {ok} = ? AND {fk} = ? LIMIT 1",
            through = self.association.through,
            fk = self.association.foreign_key,
            ok = self.association.other_key,
        );

        let relation = conn
            .query_row(&sql, params![user_id, group_id], |row| {
                Ok(UserGroupRelation {
                    user_id: row.get(0)?,
                    group_id: row.get(1)?,
                })
            })
            .optional()?;

        Ok(relation)
    }

    fn find_by_group(&self, group_id: &str) -> Result<Vec<UserGroupRelation>> {
        let conn = lock(&self.conn)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {ok}, {fk} FROM {through} WHERE {fk} = ? ORDER BY {ok} ASC",
            through = self.association.through,
            fk = self.association.foreign_key,
            ok = self.association.other_key,
        ))?;

        let rows = stmt.query_map(params![group_id], |row| {
            Ok(UserGroupRelation {
                user_id: row.get(0)?,
                group_id: row.get(1)?,
            })
        })?;

        let mut relations = Vec::new();
        for relation in rows {
            relations.push(relation?);
        }

        Ok(relations)
    }

    fn create(&self, relation: &UserGroupRelation) -> Result<()> {
        let conn = lock(&self.conn)?;

        conn.execute(
            &format!(
                "INSERT INTO {through} ({ok}, {fk}) VALUES (?, ?)",
                through = self.association.through,
                fk = self.association.foreign_key,
                ok = self.association.other_key,
            ),
            params![relation.user_id, relation.group_id],
        )?;

        Ok(())
    }
}
