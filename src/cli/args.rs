use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use super::commands;

/// Entry point for the `runlens` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "runlens",
    about = "Run prompts against a hosted agent runtime and watch tool calls",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the .env file. Relative paths, and the default `.env`, resolve
    /// against the runlens source directory recorded at build time, so
    /// installed binaries should pass an absolute path.
    #[arg(long = "env-file", global = true)]
    pub env_file: Option<PathBuf>,

    /// Enable verbose logging of runtime requests and tool calls
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a single prompt and print the answer.
    Ask(AskArgs),
    /// Run a calculation with local tools and show how the calls surface.
    Tools(ToolsArgs),
    /// Inspect configuration loaded from the .env file.
    #[command(subcommand)]
    Env(EnvCommand),
}

#[derive(Debug, Args)]
pub struct AskArgs {
    /// Model identifier (defaults to RUNLENS_MODEL or openai/gpt-5-mini).
    #[arg(long)]
    pub model: Option<String>,

    /// MCP server made available to the runtime; repeatable.
    #[arg(long = "mcp-server")]
    pub mcp_servers: Vec<String>,

    /// Print the answer as it is generated.
    #[arg(long)]
    pub stream: bool,

    /// Prompt to send.
    #[arg(required = true)]
    pub prompt: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ToolsArgs {
    /// How to surface tool calls.
    #[arg(long, value_enum, default_value_t = Method::Streaming)]
    pub method: Method,

    /// Override the calculation prompt.
    #[arg(long)]
    pub prompt: Option<String>,

    /// Model identifier (defaults to RUNLENS_TOOL_MODEL or openai/gpt-5).
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Stream tokens and tool events as they happen.
    Streaming,
    /// Run to completion, then print every introspection field present.
    Inspect,
    /// Ask the runtime for debug and verbose output.
    Debug,
    /// Wrap each tool in a logging decorator.
    Logged,
    /// Every method in turn.
    All,
}

#[derive(Debug, Subcommand)]
pub enum EnvCommand {
    /// Load the .env file and verify required keys.
    Check(CheckArgs),
    /// Print one resolved value.
    Get(GetArgs),
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Keys that must resolve; repeatable.
    #[arg(long = "require", default_values_t = vec![
        "OPENAI_API_KEY".to_string(),
        "ANTHROPIC_API_KEY".to_string(),
    ])]
    pub require: Vec<String>,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    pub key: String,

    /// Value to print when the key is not set anywhere.
    #[arg(long)]
    pub default: Option<String>,

    /// Fail when the key is not set anywhere.
    #[arg(long)]
    pub required: bool,
}

impl Cli {
    /// Applies the env file, then runs the command on a fresh tokio runtime.
    pub fn execute(self) -> Result<()> {
        let loader = commands::prepare_environment(&self)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        runtime.block_on(commands::run(self, loader))
    }
}
