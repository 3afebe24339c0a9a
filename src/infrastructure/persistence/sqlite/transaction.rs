use crate::domain::repository::{Result, TransactionScope, UnitOfWork};
use super::schema::Association;
use super::{lock, DbConnection};
use rusqlite::{params, Connection};

pub struct SqliteUnitOfWork {
    conn: DbConnection,
    association: Association,
}

impl SqliteUnitOfWork {
    pub fn new(conn: DbConnection, association: Association) -> Self {
        Self { conn, association }
    }
}

/// Writes issued against an open rusqlite transaction
struct SqliteScope<'a> {
    conn: &'a Connection,
    association: &'a Association,
}

impl TransactionScope for SqliteScope<'_> {
    fn destroy_group(&self, id: &str) -> Result<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM groups WHERE id = ?", params![id])?;
        Ok(deleted)
    }

    fn destroy_relations_of_group(&self, group_id: &str) -> Result<usize> {
        let deleted = self.conn.execute(
            &format!(
                "DELETE FROM {through} WHERE {fk} = ?",
                through = self.association.through,
                fk = self.association.foreign_key,
            ),
            params![group_id],
        )?;
        Ok(deleted)
    }
}

impl UnitOfWork for SqliteUnitOfWork {
    fn transaction(&self, work: &mut dyn FnMut(&dyn TransactionScope) -> Result<()>) -> Result<()> {
        let mut conn = lock(&self.conn)?;

        // Dropping `tx` without commit rolls back
        let tx = conn.transaction()?;

        let outcome = work(&SqliteScope {
            conn: &tx,
            association: &self.association,
        });

        match outcome {
            Ok(()) => {
                tx.commit()?;
                tracing::debug!("Transaction committed");
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback() {
                    tracing::warn!("Rollback failed: {}", rollback_err);
                }
                tracing::debug!("Transaction rolled back: {}", e);
                Err(e)
            }
        }
    }
}
