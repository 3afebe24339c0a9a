//! Table layout and the explicit schema migration step.

use crate::domain::error::DomainError;
use crate::domain::repository::Result;
use rusqlite::Connection;

/// Many-to-many association between groups and users through a join table.
///
/// `foreign_key` points at the group, `other_key` at the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub through: String,
    pub foreign_key: String,
    pub other_key: String,
}

impl Association {
    pub fn new(
        through: impl Into<String>,
        foreign_key: impl Into<String>,
        other_key: impl Into<String>,
    ) -> Result<Self> {
        let association = Self {
            through: through.into(),
            foreign_key: foreign_key.into(),
            other_key: other_key.into(),
        };
        association.validate()?;
        Ok(association)
    }

    /// Identifiers end up in SQL text, so only plain names are accepted
    pub fn validate(&self) -> Result<()> {
        for ident in [&self.through, &self.foreign_key, &self.other_key] {
            if !is_plain_identifier(ident) {
                return Err(DomainError::Config(format!(
                    "invalid association identifier: {:?}",
                    ident
                )));
            }
        }
        if self.foreign_key == self.other_key {
            return Err(DomainError::Config(
                "association keys must differ".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Association {
    fn default() -> Self {
        Self {
            through: "user_group_relations".to_string(),
            foreign_key: "group_id".to_string(),
            other_key: "user_id".to_string(),
        }
    }
}

fn is_plain_identifier(ident: &str) -> bool {
    !ident.is_empty()
        && !ident.starts_with(|c: char| c.is_ascii_digit())
        && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Create every table the service needs. Idempotent.
pub fn migrate(conn: &Connection, association: &Association) -> Result<()> {
    association.validate()?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            login TEXT NOT NULL,
            age INTEGER NOT NULL
        )",
        [],
    )?;

    // name uniqueness is checked by the service, not by the table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS groups (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            permissions TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {through} (
                {fk} TEXT NOT NULL,
                {ok} TEXT NOT NULL
            )",
            through = association.through,
            fk = association.foreign_key,
            ok = association.other_key,
        ),
        [],
    )?;

    conn.execute(
        &format!(
            "CREATE INDEX IF NOT EXISTS idx_{through}_{fk} ON {through} ({fk})",
            through = association.through,
            fk = association.foreign_key,
        ),
        [],
    )?;

    tracing::debug!("Schema synced (join table: {})", association.through);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_migrate_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn, &Association::default()).unwrap();

        assert_eq!(
            table_names(&conn),
            vec!["groups", "user_group_relations", "users"]
        );
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        let association = Association::default();
        migrate(&conn, &association).unwrap();
        conn.execute(
            "INSERT INTO groups (id, name, permissions) VALUES ('g1', 'Admins', '{}')",
            [],
        )
        .unwrap();

        migrate(&conn, &association).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM groups", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_custom_join_table() {
        let conn = Connection::open_in_memory().unwrap();
        let association = Association::new("memberships", "team_id", "member_id").unwrap();
        migrate(&conn, &association).unwrap();

        assert!(table_names(&conn).contains(&"memberships".to_string()));
        conn.execute(
            "INSERT INTO memberships (team_id, member_id) VALUES ('g', 'u')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_rejects_unsafe_identifiers() {
        assert!(Association::new("rel; DROP TABLE users", "group_id", "user_id").is_err());
        assert!(Association::new("rel", "", "user_id").is_err());
        assert!(Association::new("rel", "1group", "user_id").is_err());
        assert!(Association::new("rel", "same", "same").is_err());
        assert!(Association::new("rel", "group_id", "user_id").is_ok());
    }
}
