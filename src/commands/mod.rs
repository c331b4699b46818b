//! CLI command definitions and dispatch.

pub mod inbox;
pub mod manage;
pub mod send;
pub mod watch;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use schoolhub_core::config::AppConfig;
use schoolhub_core::result::AppResult;
use schoolhub_notify::NotificationStore;
use schoolhub_storage::StorageManager;

/// SchoolHub notification engine
#[derive(Debug, Parser)]
#[command(name = "schoolhub", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a notification
    Send(send::SendArgs),
    /// Show the inbox
    List(inbox::ListArgs),
    /// Count unread notifications
    Unread(inbox::UnreadArgs),
    /// Mark one notification read
    Read {
        /// Notification id
        id: String,
    },
    /// Mark every notification read
    ReadAll,
    /// Mark notifications with a reference id read
    ReadRef(manage::ReadRefArgs),
    /// Remove one notification
    Remove {
        /// Notification id
        id: String,
    },
    /// Remove every notification
    Clear,
    /// Show banners for notifications already in the store until Ctrl-C.
    /// Notifications sent from other processes are not picked up.
    Watch(watch::WatchArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        let store = open_store(&config).await?;
        match &self.command {
            Commands::Send(args) => send::execute(args, &store).await,
            Commands::List(args) => inbox::list(args, &store, &config, self.format),
            Commands::Unread(args) => inbox::unread(args, &store, self.format),
            Commands::Read { id } => manage::read(id, &store).await,
            Commands::ReadAll => manage::read_all(&store).await,
            Commands::ReadRef(args) => manage::read_ref(args, &store).await,
            Commands::Remove { id } => manage::remove(id, &store).await,
            Commands::Clear => manage::clear(&store).await,
            Commands::Watch(args) => watch::execute(args, store, &config).await,
        }
    }
}

/// Helper: open the notification store on the configured backend
pub async fn open_store(config: &AppConfig) -> AppResult<Arc<NotificationStore>> {
    let storage = StorageManager::new(&config.storage).await?;
    let store = NotificationStore::load(storage.backend(), &config.notifications).await;
    Ok(Arc::new(store))
}
