use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{EnvLoader, EnvStore};

use super::args::{CheckArgs, EnvCommand, GetArgs};
use super::util::mask_api_key;

pub(crate) fn handle_env(command: EnvCommand, loader: &EnvLoader, store: &dyn EnvStore) -> Result<()> {
    match command {
        EnvCommand::Check(args) => handle_check(args, loader, store),
        EnvCommand::Get(args) => handle_get(args, loader, store),
    }
}

fn handle_check(args: CheckArgs, loader: &EnvLoader, store: &dyn EnvStore) -> Result<()> {
    println!("📄 Env file: {}", loader.path().display());

    let mut loaded = Vec::new();
    for key in &args.require {
        match loader.require(store, key) {
            Ok(value) => {
                println!("{} {key} loaded successfully", "✅".green());
                loaded.push((key, value));
            }
            Err(err) => {
                println!("{} Error loading required API keys: {err}", "❌".red());
                println!("Make sure to create a .env file with your API keys");
                return Ok(());
            }
        }
    }

    let settings = OptionalSettings::resolve(loader, store)?;
    println!("🔧 Configuration:");
    println!("   Debug mode: {}", settings.debug);
    println!("   Port: {}", settings.port);
    println!("   Environment: {}", settings.environment);

    if !loaded.is_empty() {
        println!("\n🚀 Ready to make API calls!");
        for (key, value) in loaded {
            println!("   {key}: {}", mask_api_key(&value));
        }
    }

    Ok(())
}

fn handle_get(args: GetArgs, loader: &EnvLoader, store: &dyn EnvStore) -> Result<()> {
    let value = loader.get(store, &args.key, args.default.as_deref(), args.required)?;
    println!("{value}");
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OptionalSettings {
    pub debug: bool,
    pub port: u16,
    pub environment: String,
}

impl OptionalSettings {
    pub(crate) fn resolve(loader: &EnvLoader, store: &dyn EnvStore) -> Result<Self> {
        let debug = loader.get_or(store, "DEBUG", "False")?.to_lowercase() == "true";

        let port_raw = loader.get_or(store, "PORT", "8000")?;
        let port = port_raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("PORT must be a port number, got '{port_raw}'"))?;

        let environment = loader.get_or(store, "ENVIRONMENT", "development")?;

        Ok(Self {
            debug,
            port,
            environment,
        })
    }
}
