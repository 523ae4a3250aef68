//! One-shot panel commands.
//!
//! Each handler performs a single dashboard operation through the session's
//! client and exits non-zero when the API was unavailable or the action
//! failed.

use super::{BackupsCommands, ServicesCommands, Session, UpdatesCommands, UsersCommands};
use crate::api::ServiceOp;
use crate::dashboard::{Action, ResourceKind, UpdatePhase};
use crate::view::ConnectionState;
use std::error::Error;

const UNAVAILABLE: &str = "panel API unavailable";
const ACTION_FAILED: &str = "action failed";

/// Handle `panelctl status`
pub async fn handle_status(session: Session) -> Result<(), Box<dyn Error>> {
    let state = session.client.refresh_status().await;
    session.finish(
        state == ConnectionState::Connected,
        "system is offline or the panel API is unavailable",
    )
}

/// Handle `panelctl overview`
pub async fn handle_overview(session: Session) -> Result<(), Box<dyn Error>> {
    let ok = session.client.load_overview().await;
    session.finish(ok, UNAVAILABLE)
}

fn service_action(name: String, op: ServiceOp) -> Action {
    Action::ControlService { name, op }
}

/// Handle `panelctl services ...`
pub async fn handle_services(
    cmd: ServicesCommands,
    session: Session,
) -> Result<(), Box<dyn Error>> {
    let client = &session.client;
    let (ok, failure) = match cmd {
        ServicesCommands::List => (client.load_list(ResourceKind::Services).await, UNAVAILABLE),
        ServicesCommands::Start(args) => (
            client
                .perform_action(service_action(args.name, ServiceOp::Start))
                .await,
            ACTION_FAILED,
        ),
        ServicesCommands::Stop(args) => (
            client
                .perform_action(service_action(args.name, ServiceOp::Stop))
                .await,
            ACTION_FAILED,
        ),
        ServicesCommands::Restart(args) => (
            client
                .perform_action(service_action(args.name, ServiceOp::Restart))
                .await,
            ACTION_FAILED,
        ),
    };
    session.finish(ok, failure)
}

/// Handle `panelctl users ...`
pub async fn handle_users(cmd: UsersCommands, session: Session) -> Result<(), Box<dyn Error>> {
    let client = &session.client;
    let (ok, failure) = match cmd {
        UsersCommands::List => (client.load_list(ResourceKind::Users).await, UNAVAILABLE),
        UsersCommands::Create(args) => (
            client
                .create_user(&args.username, &args.password, args.admin)
                .await,
            ACTION_FAILED,
        ),
        UsersCommands::Delete(args) => {
            if !args.yes {
                return Err(format!(
                    "Refusing to delete user {} without --yes",
                    args.username
                )
                .into());
            }
            (
                client
                    .perform_action(Action::DeleteUser {
                        username: args.username,
                    })
                    .await,
                ACTION_FAILED,
            )
        }
    };
    session.finish(ok, failure)
}

/// Handle `panelctl backups ...`
pub async fn handle_backups(
    cmd: BackupsCommands,
    session: Session,
) -> Result<(), Box<dyn Error>> {
    let client = &session.client;
    let (ok, failure) = match cmd {
        BackupsCommands::List => (client.load_list(ResourceKind::Backups).await, UNAVAILABLE),
        BackupsCommands::Create => (
            client.perform_action(Action::CreateBackup).await,
            ACTION_FAILED,
        ),
    };
    session.finish(ok, failure)
}

/// Handle `panelctl updates ...`
pub async fn handle_updates(
    cmd: UpdatesCommands,
    session: Session,
) -> Result<(), Box<dyn Error>> {
    let client = &session.client;
    let (ok, failure) = match cmd {
        UpdatesCommands::Info => (client.load_updates().await, UNAVAILABLE),
        UpdatesCommands::Check => (client.check_for_updates().await, ACTION_FAILED),
        UpdatesCommands::Perform(args) => {
            let started = client.perform_update().await;
            if started && args.follow {
                let phase = client.wait_for_update().await;
                (phase == UpdatePhase::Completed, "update failed")
            } else {
                (started, ACTION_FAILED)
            }
        }
    };
    session.finish(ok, failure)
}
