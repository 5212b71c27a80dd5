use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use issue_payload::{action, github::Github, inputs::Config, pipeline, Cli};
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, Layer as _};

// stdout carries workflow commands, so logs go to stderr
pub fn initialize_logging() -> Result<()> {
    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
    let filter = tracing_subscriber::filter::EnvFilter::try_from_default_env().or_else(|_| {
        tracing_subscriber::filter::EnvFilter::try_new(if runner_debug { "debug" } else { "info" })
    })?;
    let stderr_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);
    tracing_subscriber::registry()
        .with(stderr_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    initialize_logging()?;
    let cli = Cli::parse();

    let result = match Config::from_cli(&cli) {
        Ok(config) => {
            let github = Github::new(config.api_url.clone(), config.token.clone());
            pipeline::run(&config, &github).await
        }
        Err(err) => Err(err),
    };

    let succeeded = action::report(result, cli.output_file.as_deref(), &mut std::io::stdout())
        .context("reporting result to the runner")?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
