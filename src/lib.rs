//! roomgraph - named room volumes, directed links, and graph snapshots
//!
//! The room system keeps an in-memory graph of rooms and links. Storage
//! saves and restores the whole graph by snapshot name in SQLite.

pub mod console;
pub mod db;
pub mod rooms;
pub mod storage;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use console::Console;
use db::Database;
use rooms::{CallerId, RoomSystem, SelectionTracker};
use storage::RoomSystemStorage;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "ROOMD_";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file; `None` keeps snapshots in memory
    pub database: Option<PathBuf>,
    /// Fixed caller identity; a random one is used when unset
    pub caller: Option<Uuid>,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            caller: None,
            log_filter: "roomgraph=info,roomd=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the TOML file, then `ROOMD_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = path {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        let config = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        Ok(config)
    }
}

/// The assembled room system stack
pub struct App {
    config: Config,
    db: Arc<Database>,
    system: Arc<RoomSystem>,
    storage: RoomSystemStorage,
    selections: SelectionTracker,
    caller: CallerId,
}

impl App {
    /// Open the database and build an empty room system
    pub async fn new(config: Config) -> Result<Self> {
        let db = Database::new(config.database.as_deref()).await?;
        let system = RoomSystem::shared();
        let storage = RoomSystemStorage::new(system.clone(), db.pool().clone());
        let caller = config.caller.map(CallerId).unwrap_or_else(CallerId::random);

        match &config.database {
            Some(path) => info!("Using snapshot database {}", path.display()),
            None => info!("Using in-memory snapshot database"),
        }

        Ok(Self {
            config,
            db: Arc::new(db),
            system,
            storage,
            selections: SelectionTracker::new(),
            caller,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the database handle
    pub fn db(&self) -> Arc<Database> {
        self.db.clone()
    }

    pub fn room_system(&self) -> &Arc<RoomSystem> {
        &self.system
    }

    pub fn storage(&self) -> &RoomSystemStorage {
        &self.storage
    }

    pub fn selections(&self) -> &SelectionTracker {
        &self.selections
    }

    /// The configured (or generated) caller identity
    pub fn caller(&self) -> CallerId {
        self.caller
    }

    /// A console issuing commands as `caller`
    pub fn console(&self, caller: CallerId) -> Console<'_> {
        Console::new(self, caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.database, None);
        assert_eq!(config.log_filter, Config::default().log_filter);
    }

    #[test]
    fn test_config_from_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "database = \"/tmp/rooms.db\"").unwrap();
        writeln!(file, "caller = \"6f1c9a52-3c1e-4c36-9a53-0d3c2f4f5a10\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/tmp/rooms.db")));
        assert_eq!(
            config.caller,
            Some(Uuid::parse_str("6f1c9a52-3c1e-4c36-9a53-0d3c2f4f5a10").unwrap())
        );
        // Unset keys keep their defaults
        assert_eq!(config.log_filter, Config::default().log_filter);
    }

    #[test]
    fn test_config_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/roomd.toml")));
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_app_uses_configured_caller() {
        let id = Uuid::new_v4();
        let config = Config {
            caller: Some(id),
            ..Config::default()
        };
        let app = App::new(config.clone()).await.unwrap();
        assert_eq!(app.config(), &config);
        assert_eq!(app.caller(), CallerId(id));
        app.db().health_check().await.unwrap();
    }
}
