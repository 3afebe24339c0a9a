pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod state;

use infrastructure::config::{self, AppConfig};
use infrastructure::logging;
use infrastructure::persistence::sqlite::{self, SqliteStorage};
use state::AppState;

/// Open the configured database and bring its schema up to date
pub fn init_storage(app_config: &AppConfig) -> anyhow::Result<SqliteStorage> {
    let association = app_config.storage.association.to_association()?;
    let db = sqlite::open_database(app_config.storage.sqlite.effective_path())?;

    sqlite::migrate_shared(&db, &association)?;
    tracing::info!("Database schema is up to date");

    Ok(SqliteStorage::new(db, association)?)
}

/// Boot logging and storage, migrate the schema and report what is stored
pub fn run() -> anyhow::Result<()> {
    let app_config = config::app();

    // Initialize logging
    logging::setup(&app_config.logging);

    let storage = init_storage(app_config)?;
    let state = AppState::new(storage);

    let groups = state.groups_service.get();
    match groups.data {
        Some(groups) => {
            let memberships: usize = groups.iter().map(|g| g.users.len()).sum();
            tracing::info!("{} group(s), {} membership(s)", groups.len(), memberships);
            Ok(())
        }
        None => anyhow::bail!(
            "failed to read groups: {}",
            groups.message.unwrap_or_default()
        ),
    }
}
