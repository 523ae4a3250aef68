//! CLI module for panelctl
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `watch` - Interactive auto-refreshing dashboard
//! - `status` / `overview` - One-shot system status and counters
//! - `services` - List and control services (start, stop, restart)
//! - `users` - List, create and delete users
//! - `backups` - List and create backups
//! - `updates` - Show, check for and perform updates
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Follow the dashboard, refreshing every 10 seconds
//! panelctl watch --interval 10
//!
//! # Restart a service against a remote panel
//! panelctl --api-url http://panel.lan:8081 services restart synapse
//!
//! # Machine-readable user list
//! panelctl --json users list
//! ```

pub mod commands;
pub mod completions;
pub mod config;
pub mod session;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;
pub use session::Session;

use crate::dashboard::Section;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// panelctl - Matrix server panel dashboard
#[derive(Parser, Debug)]
#[command(
    name = "panelctl",
    version,
    about = "Terminal dashboard and control client for the Matrix server panel"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "panel.toml")]
    pub config: PathBuf,

    /// Override the panel API base URL
    #[arg(short = 'u', long, global = true, env = "PANEL_API_URL")]
    pub api_url: Option<String>,

    /// Print a JSON snapshot instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "PANEL_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive dashboard with auto-refresh
    Watch(WatchArgs),
    /// Show whether the homeserver is online
    Status,
    /// Show summary counters
    Overview,
    /// Manage services
    #[command(subcommand)]
    Services(ServicesCommands),
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommands),
    /// Manage backups
    #[command(subcommand)]
    Backups(BackupsCommands),
    /// Manage updates
    #[command(subcommand)]
    Updates(UpdatesCommands),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Section to open (overview, services, users, backups, updates, settings)
    #[arg(short, long, default_value = "overview")]
    pub section: Section,

    /// Override auto-refresh interval in seconds
    #[arg(short, long)]
    pub interval: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum ServicesCommands {
    /// List services and their state
    List,
    /// Start a service
    Start(ServiceArgs),
    /// Stop a service
    Stop(ServiceArgs),
    /// Restart a service
    Restart(ServiceArgs),
}

#[derive(Args, Debug)]
pub struct ServiceArgs {
    /// Service name as listed by `services list`
    pub name: String,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// List users
    List,
    /// Create a user
    Create(UserCreateArgs),
    /// Delete a user
    Delete(UserDeleteArgs),
}

#[derive(Args, Debug)]
pub struct UserCreateArgs {
    /// Username (localpart)
    pub username: String,

    /// Initial password
    #[arg(short, long, env = "PANEL_NEW_USER_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Grant server admin rights
    #[arg(long)]
    pub admin: bool,
}

#[derive(Args, Debug)]
pub struct UserDeleteArgs {
    /// Username to delete
    pub username: String,

    /// Confirm the deletion
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum BackupsCommands {
    /// List backup archives
    List,
    /// Create a new backup
    Create,
}

#[derive(Subcommand, Debug)]
pub enum UpdatesCommands {
    /// Show current and latest version
    Info,
    /// Ask the panel to check for updates
    Check,
    /// Start an update
    Perform(UpdatePerformArgs),
}

#[derive(Args, Debug)]
pub struct UpdatePerformArgs {
    /// Follow progress until the update finishes
    #[arg(short, long)]
    pub follow: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "panel.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
