//! roomd - interactive room graph console

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use roomgraph::{App, Config};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Room graph console
#[derive(Parser, Debug)]
#[command(name = "roomd", version, about = "Edit and snapshot a room graph")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database file for snapshots (in-memory if unset)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Caller identity to issue commands as
    #[arg(long)]
    caller: Option<Uuid>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if args.database.is_some() {
        config.database = args.database;
    }
    if args.caller.is_some() {
        config.caller = args.caller;
    }

    // Logs go to stderr so replies on stdout stay clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let app = App::new(config).await?;
    let console = app.console(app.caller());
    info!("roomd ready (caller {})", console.caller());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        let reply = console.execute(line).await;
        stdout.write_all(format!("{}\n", reply).as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("roomd shutdown complete");
    Ok(())
}
