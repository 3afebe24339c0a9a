mod group_repo;
pub mod schema;
mod transaction;
mod user_group_repo;
mod user_repo;

pub use group_repo::SqliteGroupRepository;
pub use schema::{migrate, Association};
pub use transaction::SqliteUnitOfWork;
pub use user_group_repo::SqliteUserGroupRepository;
pub use user_repo::SqliteUserRepository;

use crate::domain::error::DomainError;
use crate::domain::repository::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

pub type DbConnection = Arc<Mutex<Connection>>;

/// Open (or create) the SQLite database file at `path`.
///
/// Tables are not created here; call [`migrate`] once after opening.
pub fn open_database(path: impl AsRef<Path>) -> anyhow::Result<DbConnection> {
    let db_path = path.as_ref();

    // Ensure directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!("Opening database at {:?}", db_path);

    let conn = Connection::open(db_path)?;

    Ok(Arc::new(Mutex::new(conn)))
}

/// Open a private in-memory database
pub fn open_in_memory() -> anyhow::Result<DbConnection> {
    let conn = Connection::open_in_memory()?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Run the schema migration against a shared connection
pub fn migrate_shared(conn: &DbConnection, association: &Association) -> Result<()> {
    let conn = lock(conn)?;
    migrate(&conn, association)
}

pub(crate) fn lock(conn: &DbConnection) -> Result<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|e| DomainError::Database(e.to_string()))
}

/// All persistence handles the groups service needs, sharing one connection
pub struct SqliteStorage {
    pub groups: SqliteGroupRepository,
    pub users: SqliteUserRepository,
    pub user_group: SqliteUserGroupRepository,
    pub unit_of_work: SqliteUnitOfWork,
}

impl SqliteStorage {
    pub fn new(conn: DbConnection, association: Association) -> Result<Self> {
        association.validate()?;

        Ok(Self {
            groups: SqliteGroupRepository::new(conn.clone(), association.clone()),
            users: SqliteUserRepository::new(conn.clone()),
            user_group: SqliteUserGroupRepository::new(conn.clone(), association.clone()),
            unit_of_work: SqliteUnitOfWork::new(conn, association),
        })
    }
}
