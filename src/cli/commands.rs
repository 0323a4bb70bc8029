use std::sync::Arc;

use anyhow::{Context, Result};

use crate::client::RuntimeClient;
use crate::config::{Config, EnvLoader, ProcessEnv};
use crate::runner::Runner;

use super::args::{Cli, Command};
use super::ask;
use super::env_cmd;
use super::tools_cmd;

/// Loads the env file into the process environment.
///
/// Runs before the async runtime starts, while the process is still
/// single-threaded.
pub(crate) fn prepare_environment(cli: &Cli) -> Result<EnvLoader> {
    let loader = match &cli.env_file {
        Some(path) => EnvLoader::with_file(path),
        None => EnvLoader::new(),
    };

    loader
        .setup_environment(&mut ProcessEnv)
        .context("Failed to load environment file")?;
    Ok(loader)
}

pub(crate) async fn run(cli: Cli, loader: EnvLoader) -> Result<()> {
    match cli.command {
        Command::Ask(args) => {
            let config = load_config()?;
            ask::handle_ask(args, &config, &build_runner(&config)?).await
        }
        Command::Tools(args) => {
            let config = load_config()?;
            tools_cmd::handle_tools(args, &config, &build_runner(&config)?).await
        }
        Command::Env(command) => env_cmd::handle_env(command, &loader, &ProcessEnv),
    }
}

fn load_config() -> Result<Config> {
    Config::load(&ProcessEnv).context("Runtime configuration is incomplete")
}

pub(crate) fn build_runner(config: &Config) -> Result<Runner> {
    let client = RuntimeClient::new(&config.runtime)?;
    Ok(Runner::new(Arc::new(client), config.models.max_steps))
}
