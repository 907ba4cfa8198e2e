// src/main.rs
mod cli;
mod commands;
mod config;
mod edgar;
mod extractors;
mod storage;
mod utils;

use clap::Parser;
use cli::Cli;
use commands::App;
use config::AppContext;
use std::process::ExitCode;
use storage::StorageManager;
use utils::AppError;

async fn run(cli: Cli) -> Result<(), AppError> {
    // Configuration directory is resolved once here and handed to every command
    let ctx = match &cli.config_dir {
        Some(dir) => AppContext::new(dir),
        None => AppContext::from_platform(),
    };
    tracing::debug!("Using configuration directory {}", ctx.config_dir().display());

    let storage = StorageManager::new(&cli.output_dir)?;
    App::new(ctx, storage).run(cli.command).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    utils::logging::setup_logging(cli.verbose);
    tracing::debug!("Starting with args: {:?}", cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
