mod cli;
mod display;
mod error;
mod models;
mod store;

use anyhow::Context;
use clap::Parser;
use cli::{App, Cli, LogFormat};
use error::AppError;
use colored::*;
use std::path::Path;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Sets up the global subscriber. Logs never go to standard output, which is
/// reserved for the menu.
///
/// The returned guard must be held until exit so buffered file logs are flushed.
fn init_logging(cli: &Cli) -> anyhow::Result<Option<WorkerGuard>> {
    let (writer, guard) = match &cli.log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("log file {} has no file name", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        },
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(cli.log_file.is_none())
        .with_writer(writer);

    match cli.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }

    Ok(guard)
}

fn main() -> anyhow::Result<()> {
    // Values from a local .env file feed the clap `env` fallbacks
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let _log_guard = init_logging(&cli)?;

    info!("Initializing state information app...");

    // Load the states file and wire up the display collaborators
    let mut app = match App::new(&cli) {
        Ok(app) => {
            info!("Application initialized successfully.");
            app
        },
        Err(e) => {
            error!("Failed to initialize application: {:?}", e);
            eprintln!(
                "{}",
                "Error: Failed to initialize application. Check logs.".red()
            );
            return Err(e)
                .with_context(|| format!("failed to load {}", cli.states_file.display()));
        },
    };

    if let Err(e) = app.run() {
        error!("Session ended with an error: {:?}", e);
        let context = match e {
            AppError::InputClosed => "input ended before the session was finished",
            _ => "state information session failed",
        };
        return Err(e).context(context);
    }

    Ok(())
}
