//! Console - the text command surface over the room system
//!
//! One input line is one command. Each command runs for a single caller
//! and produces a [`Reply`] with a status code and a human-readable message.

use std::fmt;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::rooms::{CallerId, Point, RoomError, RoomSystemResult};
use crate::storage::ReadOutcome;
use crate::App;

/// Status attached to every reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success = 1,
    Fail = 2,
    Warning = 3,
    Unknown = 4,
}

impl CommandStatus {
    /// Numeric status code
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CommandStatus::Success => "ok",
            CommandStatus::Fail => "fail",
            CommandStatus::Warning => "warning",
            CommandStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Result of one console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: CommandStatus,
    pub message: String,
}

impl Reply {
    fn new(status: CommandStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self::new(CommandStatus::Success, message)
    }

    fn fail(message: impl Into<String>) -> Self {
        Self::new(CommandStatus::Fail, message)
    }

    fn warning(message: impl Into<String>) -> Self {
        Self::new(CommandStatus::Warning, message)
    }

    fn unknown(message: impl Into<String>) -> Self {
        Self::new(CommandStatus::Unknown, message)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

#[derive(Parser, Debug)]
#[command(name = "roomd", no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Mark the first selection point
    Pos1 {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        #[arg(allow_negative_numbers = true)]
        z: i32,
    },
    /// Mark the second selection point
    Pos2 {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        #[arg(allow_negative_numbers = true)]
        z: i32,
    },
    /// Forget both selection points
    Clear,
    /// Save the whole graph as a named snapshot
    Save { name: String },
    /// Replace the graph with a named snapshot
    Read { name: String },
    /// List saved snapshots
    Snapshots,
    /// Room commands
    Room {
        #[command(subcommand)]
        command: RoomCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum RoomCommand {
    /// Create a room from the two selected points
    Create { name: String },
    /// Delete a room, or every room with `all`
    Delete { name: String },
    /// Link the first room to the second
    Link { first: String, second: String },
    /// Remove the link from the first room to the second
    Unlink { first: String, second: String },
    /// Show rooms or links
    Show {
        #[command(subcommand)]
        what: ShowCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ShowCommand {
    /// All room names, or one room's points
    Rooms { name: Option<String> },
    /// All links, or the links touching one room
    Links { name: Option<String> },
}

fn parse(line: &str) -> Result<Command, clap::Error> {
    Line::try_parse_from(line.split_whitespace()).map(|line| line.command)
}

fn describe(point: Option<Point>) -> String {
    point.map_or_else(|| "none".to_string(), |p| p.to_string())
}

fn join(items: impl IntoIterator<Item = String>) -> String {
    items.into_iter().collect::<Vec<_>>().join(", ")
}

/// Command executor bound to one caller
pub struct Console<'a> {
    app: &'a App,
    caller: CallerId,
}

impl<'a> Console<'a> {
    pub fn new(app: &'a App, caller: CallerId) -> Self {
        Self { app, caller }
    }

    pub fn caller(&self) -> CallerId {
        self.caller
    }

    /// Parse and run one command line
    pub async fn execute(&self, line: &str) -> Reply {
        let command = match parse(line) {
            Ok(command) => command,
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                return Reply::success(e.render().to_string())
            }
            Err(e) => return Reply::unknown(e.render().to_string()),
        };
        debug!("{} runs {:?}", self.caller, command);

        match command {
            Command::Pos1 { x, y, z } => {
                let point = Point::new(x, y, z);
                self.app.selections().mark_first(self.caller, point);
                Reply::success(format!("First point set to {}", point))
            }
            Command::Pos2 { x, y, z } => {
                let point = Point::new(x, y, z);
                self.app.selections().mark_second(self.caller, point);
                Reply::success(format!("Second point set to {}", point))
            }
            Command::Clear => {
                self.app.selections().clear(self.caller);
                Reply::success("Selection cleared")
            }
            Command::Save { name } => self.save(&name).await,
            Command::Read { name } => self.read(&name).await,
            Command::Snapshots => self.snapshots().await,
            Command::Room { command } => match command {
                RoomCommand::Create { name } => self.room_create(&name).await,
                RoomCommand::Delete { name } if name == "all" => self.room_delete_all().await,
                RoomCommand::Delete { name } => self.room_delete(&name).await,
                RoomCommand::Link { first, second } => self.room_link(&first, &second).await,
                RoomCommand::Unlink { first, second } => self.room_unlink(&first, &second).await,
                RoomCommand::Show { what } => match what {
                    ShowCommand::Rooms { name: None } => self.show_rooms().await,
                    ShowCommand::Rooms { name: Some(name) } => self.show_room(&name).await,
                    ShowCommand::Links { name: None } => self.show_links().await,
                    ShowCommand::Links { name: Some(name) } => self.show_room_links(&name).await,
                },
            },
        }
    }

    async fn save(&self, name: &str) -> Reply {
        match self.app.storage().save(name).await {
            Ok(()) => Reply::success(format!("Snapshot saved (name: {})", name)),
            Err(e) => Reply::fail(format!("Snapshot could not be saved (name: {}): {}", name, e)),
        }
    }

    async fn read(&self, name: &str) -> Reply {
        match self.app.storage().read(name).await {
            ReadOutcome::Success => Reply::success(format!("Snapshot loaded (name: {})", name)),
            ReadOutcome::Fail => {
                Reply::fail(format!("Snapshot could not be loaded (name: {})", name))
            }
        }
    }

    async fn snapshots(&self) -> Reply {
        match self.app.storage().list().await {
            Ok(list) if list.is_empty() => Reply::success("No snapshots found"),
            Ok(list) => Reply::success(format!(
                "Snapshots: {}",
                join(list.into_iter().map(|s| format!(
                    "{} ({} rooms, {} links, saved {})",
                    s.name, s.room_count, s.link_count, s.saved_at
                )))
            )),
            Err(e) => Reply::fail(format!("Snapshots could not be listed: {}", e)),
        }
    }

    async fn room_create(&self, name: &str) -> Reply {
        let system = self.app.room_system();
        let selections = self.app.selections();

        // Points for the reply are read before the room is created
        let points = system.get_points(selections, self.caller);
        let details = format!(
            " (name: {} first point: {} second point: {})",
            name,
            describe(points.map(|p| p.0)),
            describe(points.map(|p| p.1))
        );

        match system.create_room(selections, self.caller, name).await {
            Ok(_) => Reply::success(format!("Room created{}", details)),
            Err(RoomError::RoomExists(_)) => {
                Reply::fail(format!("A room with this name already exists{}", details))
            }
            Err(RoomError::IncompleteSelection { .. }) => {
                Reply::fail(format!("Select two points first{}", details))
            }
            Err(e @ RoomError::InvalidName(_)) => Reply::fail(format!("{}{}", e, details)),
            Err(e) => Reply::unknown(e.to_string()),
        }
    }

    async fn room_delete(&self, name: &str) -> Reply {
        match self.app.room_system().delete_room(name).await {
            Ok(deletion) => match deletion.result_code() {
                RoomSystemResult::OneWayLink => Reply::warning(format!(
                    "Room deleted, but some of its links were one-way (name: {})",
                    name
                )),
                _ => Reply::success(format!("Room deleted (name: {})", name)),
            },
            Err(RoomError::RoomNotFound(_)) => {
                Reply::fail(format!("Room does not exist (name: {})", name))
            }
            Err(e) => Reply::unknown(e.to_string()),
        }
    }

    async fn room_delete_all(&self) -> Reply {
        self.app.room_system().delete_all_rooms().await;
        Reply::success("All rooms deleted")
    }

    async fn room_link(&self, first: &str, second: &str) -> Reply {
        let details = format!(" (name 1: {} name 2: {})", first, second);
        let result = self
            .app
            .room_system()
            .link(self.app.selections(), self.caller, first, second)
            .await;

        match result {
            Ok(()) => Reply::success(format!("Rooms linked{}", details)),
            Err(RoomError::SameRoom(_)) => {
                Reply::fail(format!("A room cannot be linked to itself{}", details))
            }
            Err(RoomError::RoomNotFound(_)) => {
                Reply::fail(format!("Room does not exist{}", details))
            }
            Err(RoomError::IncompleteSelection { .. }) => {
                Reply::fail(format!("Mark a point first{}", details))
            }
            Err(RoomError::LinkExists { .. }) => {
                Reply::fail(format!("These rooms are already linked{}", details))
            }
            Err(e) => Reply::unknown(e.to_string()),
        }
    }

    async fn room_unlink(&self, first: &str, second: &str) -> Reply {
        let details = format!(" (name 1: {} name 2: {})", first, second);

        match self.app.room_system().unlink(first, second).await {
            Ok(()) => Reply::success(format!("Rooms unlinked{}", details)),
            Err(RoomError::SameRoom(_)) => {
                Reply::fail(format!("A room cannot be unlinked from itself{}", details))
            }
            Err(RoomError::RoomNotFound(_)) => {
                Reply::fail(format!("Room does not exist{}", details))
            }
            Err(RoomError::LinkAbsent { .. }) => {
                Reply::fail(format!("These rooms are not linked{}", details))
            }
            Err(e) => Reply::unknown(e.to_string()),
        }
    }

    async fn show_rooms(&self) -> Reply {
        let names = self.app.room_system().get_all_room_names().await;
        if names.is_empty() {
            return Reply::success("No rooms found");
        }
        Reply::success(format!("Rooms: {}", join(names)))
    }

    async fn show_room(&self, name: &str) -> Reply {
        match self.app.room_system().get_room(name).await {
            Some(room) => Reply::success(format!(
                "Room found (first point: {} second point: {})",
                room.first_point, room.second_point
            )),
            None => Reply::fail(format!("Room does not exist (name: {})", name)),
        }
    }

    async fn show_links(&self) -> Reply {
        let names = self.app.room_system().get_all_link_names().await;
        if names.is_empty() {
            return Reply::success("No links found");
        }
        Reply::success(format!("Links: {}", join(names)))
    }

    async fn show_room_links(&self, name: &str) -> Reply {
        let Some(names) = self
            .app
            .room_system()
            .get_all_link_names_by_room_name(name)
            .await
        else {
            return Reply::fail(format!("Room does not exist (name: {})", name));
        };

        if names.is_empty() {
            return Reply::success(format!("No links found for room {}", name));
        }
        Reply::success(format!("Links: {}", join(names)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse("pos1 1 -2 3").unwrap(),
            Command::Pos1 { x: 1, y: -2, z: 3 }
        );
        assert_eq!(
            parse("room link a b").unwrap(),
            Command::Room {
                command: RoomCommand::Link {
                    first: "a".to_string(),
                    second: "b".to_string()
                }
            }
        );
        assert_eq!(
            parse("room show links").unwrap(),
            Command::Room {
                command: RoomCommand::Show {
                    what: ShowCommand::Links { name: None }
                }
            }
        );
        assert_eq!(
            parse("save  backup ").unwrap(),
            Command::Save {
                name: "backup".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("").is_err());
        assert!(parse("fly away").is_err());
        assert!(parse("pos1 1 2").is_err());
        assert!(parse("room link a").is_err());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CommandStatus::Success.code(), 1);
        assert_eq!(CommandStatus::Fail.code(), 2);
        assert_eq!(CommandStatus::Warning.code(), 3);
        assert_eq!(CommandStatus::Unknown.code(), 4);
    }

    #[tokio::test]
    async fn test_create_without_selection() {
        let app = App::new(Config::default()).await.unwrap();
        let console = app.console(app.caller());

        let reply = console.execute("room create hall").await;
        assert_eq!(reply.status, CommandStatus::Fail);
        assert!(reply.message.contains("first point: none"));
    }

    #[tokio::test]
    async fn test_create_echoes_points() {
        let app = App::new(Config::default()).await.unwrap();
        let console = app.console(app.caller());

        console.execute("pos1 0 0 0").await;
        console.execute("pos2 1 -1 1").await;
        let reply = console.execute("room create hall").await;
        assert_eq!(reply.status, CommandStatus::Success);
        assert_eq!(
            reply.message,
            "Room created (name: hall first point: (0, 0, 0) second point: (1, -1, 1))"
        );
    }

    #[tokio::test]
    async fn test_unparseable_line() {
        let app = App::new(Config::default()).await.unwrap();
        let reply = app.console(app.caller()).execute("dance").await;
        assert_eq!(reply.status, CommandStatus::Unknown);
    }

    #[tokio::test]
    async fn test_show_rooms_empty() {
        let app = App::new(Config::default()).await.unwrap();
        let reply = app.console(app.caller()).execute("room show rooms").await;
        assert_eq!(reply, Reply::success("No rooms found"));
    }
}
