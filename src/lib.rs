pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

use std::io::{BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, Console, GroupCommands, MemberCommands};
pub use config::Config;
use config::GeneralConfig;
use db::Store;
use services::{MemberError, MemberService, SeaOrmMemberService};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut console = Console::stdio(!cli.no_interaction);

    // The config file may not exist yet, so `init` never loads it.
    if let Commands::Init = cli.command {
        init_tracing(&GeneralConfig::default().log_level);
        return Ok(finish(cli::cmd_init(&mut console, &cli.config_path())));
    }

    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config.general.log_level);
    config.validate()?;

    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await
    .with_context(|| format!("Failed to open database {}", config.general.database_path))?;

    let service = SeaOrmMemberService::new(store, config.security.clone());

    let result = dispatch(&service, &mut console, cli).await;
    Ok(finish(result))
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn finish(result: Result<(), MemberError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if matches!(err, MemberError::Database(_) | MemberError::Internal(_)) {
                debug!("Command failed: {err:?}");
            }
            eprintln!("[ERROR] {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Runs one parsed command line against `service`.
pub async fn dispatch<R: BufRead, W: Write>(
    service: &dyn MemberService,
    console: &mut Console<R, W>,
    cli: Cli,
) -> Result<(), MemberError> {
    let config_path = cli.config_path();

    match cli.command {
        Commands::Member { command } => match command {
            MemberCommands::Create(args) => cli::cmd_member_create(service, console, args).await,
            MemberCommands::Delete { username } => {
                cli::cmd_member_delete(service, console, &username).await
            }
            MemberCommands::List(args) => cli::cmd_member_list(service, console, args).await,
            MemberCommands::Password(args) => {
                cli::cmd_member_password(service, console, args).await
            }
        },
        Commands::Group { command } => match command {
            GroupCommands::Create { name } => cli::cmd_group_create(service, console, &name).await,
            GroupCommands::List => cli::cmd_group_list(service, console).await,
        },
        Commands::Init => cli::cmd_init(console, &config_path),
    }
}
