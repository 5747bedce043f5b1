//! RoomTest harness - a full stack over an on-disk database

use std::path::PathBuf;

use anyhow::Result;
use roomgraph::console::Reply;
use roomgraph::rooms::{CallerId, Point};
use roomgraph::{App, Config};
use tempfile::TempDir;

/// Test harness owning a temporary database directory
pub struct RoomTest {
    pub app: App,
    pub caller: CallerId,
    db_path: PathBuf,
    _dir: TempDir,
}

impl RoomTest {
    /// Start a fresh stack with an empty database file
    pub async fn start() -> Result<Self> {
        let dir = TempDir::new()?;
        let db_path = dir.path().join("rooms.db");
        let app = App::new(Self::config(&db_path)).await?;
        let caller = app.caller();

        Ok(Self {
            app,
            caller,
            db_path,
            _dir: dir,
        })
    }

    fn config(db_path: &std::path::Path) -> Config {
        Config {
            database: Some(db_path.to_path_buf()),
            ..Config::default()
        }
    }

    /// Drop the live stack and open a new one over the same database file
    pub async fn restart(self) -> Result<Self> {
        let Self {
            app,
            caller,
            db_path,
            _dir,
        } = self;
        drop(app);

        let app = App::new(Self::config(&db_path)).await?;
        Ok(Self {
            app,
            caller,
            db_path,
            _dir,
        })
    }

    /// Mark both selection points for the harness caller
    pub fn select(&self, first: Point, second: Point) {
        self.app.selections().mark_first(self.caller, first);
        self.app.selections().mark_second(self.caller, second);
    }

    /// Select two points and create a room
    pub async fn room(&self, name: &str, first: Point, second: Point) {
        self.select(first, second);
        self.app
            .room_system()
            .create_room(self.app.selections(), self.caller, name)
            .await
            .expect("Failed to create room");
    }

    /// Run a console command as the harness caller
    pub async fn run(&self, line: &str) -> Reply {
        self.app.console(self.caller).execute(line).await
    }
}
