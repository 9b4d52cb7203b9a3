use std::{io::IsTerminal, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use prompts_loader::{cli::Cli, Loader};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_tracing(cli.log_level()) {
        eprintln!("Warning: {:#}", err);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        },
    }
}

/// Initialize tracing subscriber for logging
///
/// Logs go to stderr. `RUST_LOG` overrides the level picked by `-v`.
fn init_tracing(level: Level) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.into_config().context("Failed to configure the loader")?;
    let db_path = config.db_path();
    let loader = Loader::new(config);

    debug!(
        db = %db_path.display(),
        json = %loader.config().json_path().display(),
        schema = %loader.config().schema_path().display(),
        "resolved paths"
    );

    match loader.run() {
        Ok(Some(report)) => {
            info!(
                db = %db_path.display(),
                inserted = report.inserted,
                "prompts index rebuilt"
            );
            Ok(())
        },
        Ok(None) => Ok(()),
        Err(err) => {
            debug!(category = err.category(), error = %err, "load failed");
            Err(anyhow::anyhow!(err.user_message()))
                .with_context(|| format!("Failed to load prompts into {}", db_path.display()))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_tracing_init_reports_error() {
        assert!(init_tracing(Level::WARN).is_ok());
        let err = init_tracing(Level::WARN).unwrap_err();
        assert!(err.to_string().contains("Failed to initialize tracing subscriber"));
    }
}
