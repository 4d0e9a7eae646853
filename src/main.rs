#![warn(clippy::all, clippy::pedantic)]

use clap::Parser;
use handloom::Config;
use handloom::app::dispatch::dispatch;
use handloom::cli::Cli;
use handloom::ui::style as ui;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays clean on stdout.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to install log subscriber: {e}");
    }

    let config = match Config::load_or_init() {
        Ok(mut config) => {
            config.apply_env_overrides();
            config
        }
        Err(e) => {
            eprintln!("{} {e:#}", ui::error("Error:"));
            return ExitCode::FAILURE;
        }
    };

    match dispatch(cli, Arc::new(config)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", ui::error("Error:"));
            ExitCode::FAILURE
        }
    }
}
