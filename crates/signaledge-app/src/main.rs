mod cli;
mod commands;

use std::process::ExitCode;

use signaledge_config::{env, toml_loader, ProcessEnv};
use tracing_subscriber::EnvFilter;

use crate::cli::Command;

fn init_logging(directive: Option<&str>) {
    let directive = directive.unwrap_or("signaledge=info");
    let filter = match directive.parse() {
        Ok(d) => EnvFilter::from_default_env().add_directive(d),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_config(path: Option<&std::path::Path>) -> signaledge_common::Result<()> {
    let path = toml_loader::settings_path(path, &ProcessEnv)?;
    if toml_loader::create_default_config(&path)? {
        println!("wrote {}", path.display());
    } else {
        println!("{} already exists", path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the environment
    let dotenv = env::load_dotenv();

    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("SignalEdge v{} starting...", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(Some(path)) => tracing::debug!("environment loaded from {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("{e}");
            eprintln!("signaledge: warning: {e}");
        }
    }

    let command = match args.command {
        Command::InitConfig => {
            return match init_config(args.config.as_deref()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!("failed to write settings: {e}");
                    eprintln!("signaledge: {e}");
                    ExitCode::FAILURE
                }
            };
        }
        Command::Client(command) => command,
    };

    // The client must exist before any command runs; a missing credential
    // stops startup here.
    let client = match signaledge_client::init_from_env(args.config.as_deref(), &ProcessEnv) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("startup failed: {e}");
            eprintln!("signaledge: {e}");
            return ExitCode::FAILURE;
        }
    };

    match commands::run(command, client).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("signaledge: {e}");
            ExitCode::FAILURE
        }
    }
}
