use crate::domain::model::User;
use crate::domain::repository::{Result, UserRepository};
use super::{lock, DbConnection};
use rusqlite::params;

pub struct SqliteUserRepository {
    conn: DbConnection,
}

impl SqliteUserRepository {
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository {
    fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let conn = lock(&self.conn)?;

        let mut stmt = conn.prepare("SELECT id, login, age FROM users WHERE id = ?")?;

        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(User {
                id: row.get(0)?,
                login: row.get(1)?,
                age: row.get(2)?,
            }))
        } else {
            Ok(None)
        }
    }

    fn create(&self, user: &User) -> Result<()> {
        let conn = lock(&self.conn)?;

        conn.execute(
            "INSERT INTO users (id, login, age) VALUES (?, ?, ?)",
            params![user.id, user.login, user.age],
        )?;

        Ok(())
    }
}
