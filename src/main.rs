use clap::Parser;
use panelctl::cli::commands::{
    handle_backups, handle_overview, handle_services, handle_status, handle_updates,
    handle_users,
};
use panelctl::cli::session::load_config_with_overrides;
use panelctl::cli::watch::run_watch;
use panelctl::cli::{
    handle_completions, handle_config_init, Cli, Commands, ConfigCommands, GlobalArgs, Session,
};
use panelctl::config::PanelConfig;
use panelctl::logging::init_tracing;
use std::error::Error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let global = cli.global;
    match cli.command {
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
        Commands::Watch(args) => run_watch(args, setup(&global)?).await,
        Commands::Status => handle_status(connect(&global)?).await,
        Commands::Overview => handle_overview(connect(&global)?).await,
        Commands::Services(cmd) => handle_services(cmd, connect(&global)?).await,
        Commands::Users(cmd) => handle_users(cmd, connect(&global)?).await,
        Commands::Backups(cmd) => handle_backups(cmd, connect(&global)?).await,
        Commands::Updates(cmd) => handle_updates(cmd, connect(&global)?).await,
    }
}

/// Load configuration and start logging.
fn setup(global: &GlobalArgs) -> Result<PanelConfig, Box<dyn Error>> {
    let config = load_config_with_overrides(global)?;
    init_tracing(&config.logging)?;
    Ok(config)
}

fn connect(global: &GlobalArgs) -> Result<Session, Box<dyn Error>> {
    let config = setup(global)?;
    Session::connect(&config, global.json)
}
