//! Watch command: the interactive dashboard.
//!
//! Starts the dashboard client with auto-refresh and reads one command per
//! line from stdin until `quit`, end of input, or a shutdown signal.

use super::{Session, WatchArgs};
use crate::api::ServiceOp;
use crate::config::PanelConfig;
use crate::dashboard::{Action, DashboardClient, Section};
use std::error::Error;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  overview | services | users | backups | updates | settings   switch section
  refresh                                reload status and current section
  start|stop|restart <service>           control a service
  add-user <name> <password> [admin]     create a user
  delete-user <name>                     delete a user
  backup                                 create a backup
  check                                  check for updates
  update                                 perform update and follow progress
  help                                   show this help
  quit                                   exit";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Section(Section),
    Refresh,
    Act(Action),
    AddUser {
        username: String,
        password: String,
        admin: bool,
    },
    Check,
    Update,
    Help,
    Quit,
}

impl FromStr for WatchCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, rest)) = words.split_first() else {
            return Err("empty command".to_string());
        };

        if let Ok(section) = head.parse::<Section>() {
            if rest.is_empty() {
                return Ok(WatchCommand::Section(section));
            }
        }

        match (head.to_lowercase().as_str(), rest) {
            ("refresh" | "r", []) => Ok(WatchCommand::Refresh),
            ("start" | "stop" | "restart", [name]) => Ok(WatchCommand::Act(Action::ControlService {
                name: name.to_string(),
                op: head.parse::<ServiceOp>()?,
            })),
            ("delete-user", [username]) => Ok(WatchCommand::Act(Action::DeleteUser {
                username: username.to_string(),
            })),
            ("add-user", [username, password]) => Ok(WatchCommand::AddUser {
                username: username.to_string(),
                password: password.to_string(),
                admin: false,
            }),
            ("add-user", [username, password, "admin"]) => Ok(WatchCommand::AddUser {
                username: username.to_string(),
                password: password.to_string(),
                admin: true,
            }),
            ("backup", []) => Ok(WatchCommand::Act(Action::CreateBackup)),
            ("check", []) => Ok(WatchCommand::Check),
            ("update", []) => Ok(WatchCommand::Update),
            ("help" | "?", _) => Ok(WatchCommand::Help),
            ("quit" | "exit" | "q", []) => Ok(WatchCommand::Quit),
            _ => Err(format!("unrecognized command '{}', type 'help'", line.trim())),
        }
    }
}

/// Run one command against the client. Returns false when the session
/// should end.
pub async fn dispatch(client: &DashboardClient, command: WatchCommand) -> bool {
    match command {
        WatchCommand::Section(section) => {
            client.select_section(section).await;
        }
        WatchCommand::Refresh => {
            client.reload().await;
        }
        WatchCommand::Act(action) => {
            client.perform_action(action).await;
        }
        WatchCommand::AddUser {
            username,
            password,
            admin,
        } => {
            client.create_user(&username, &password, admin).await;
        }
        WatchCommand::Check => {
            client.check_for_updates().await;
        }
        WatchCommand::Update => {
            client.perform_update().await;
        }
        WatchCommand::Help => println!("{}", HELP),
        WatchCommand::Quit => return false,
    }
    true
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

/// Main watch command handler
pub async fn run_watch(args: WatchArgs, mut config: PanelConfig) -> Result<(), Box<dyn Error>> {
    if let Some(interval) = args.interval {
        config.refresh.interval_seconds = interval;
        config.validate()?;
    }

    let session = Session::connect(&config, false)?;
    let client = session.client.with_section(args.section);

    client.start().await;
    println!("Type 'help' for commands, 'quit' to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<WatchCommand>() {
                    Ok(command) => {
                        if !dispatch(&client, command).await {
                            break;
                        }
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
        }
    }

    client.stop();
    Ok(())
}
