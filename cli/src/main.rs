//! `cinder` binary entry point.

use cinder_cli::{Cli, CliConfig, CommandClock, Context};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };

    let log_format = cli.log_format.unwrap_or(config.log_format);
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.clone());
    cinder_utils::init_logging(log_format, &log_level)?;
    if let Some(path) = &cli.config {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let ctx = Context {
        state_file: cli.state.clone().unwrap_or_else(|| config.state_file.clone()),
        caller: cli.caller,
        clock: CommandClock::new(cli.at),
        config,
    };

    let output = cinder_cli::execute(cli.command, &ctx).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
