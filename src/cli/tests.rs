use std::fs;

use clap::Parser;
use tempfile::TempDir;

use crate::config::tests::env_lock;
use crate::config::{EnvLoader, MemoryEnv};

use super::args::{Cli, Command, EnvCommand, Method};
use super::commands::prepare_environment;
use super::env_cmd::OptionalSettings;
use super::tools_cmd::{Demo, demos};
use super::util::mask_api_key;

#[test]
fn parse_ask_with_mcp_servers() {
    let cli = Cli::parse_from([
        "runlens",
        "ask",
        "--mcp-server",
        "windsor/brave-search-mcp",
        "--stream",
        "Who",
        "won?",
    ]);
    let Command::Ask(args) = cli.command else {
        panic!("expected ask");
    };
    assert_eq!(args.prompt, vec!["Who".to_string(), "won?".to_string()]);
    assert_eq!(args.mcp_servers, vec!["windsor/brave-search-mcp".to_string()]);
    assert!(args.stream);
    assert_eq!(args.model, None);
}

#[test]
fn parse_tools_defaults_to_streaming() {
    let cli = Cli::parse_from(["runlens", "tools"]);
    let Command::Tools(args) = cli.command else {
        panic!("expected tools");
    };
    assert_eq!(args.method, Method::Streaming);

    let cli = Cli::parse_from(["runlens", "-v", "tools", "--method", "all"]);
    assert!(cli.verbose);
    let Command::Tools(args) = cli.command else {
        panic!("expected tools");
    };
    assert_eq!(args.method, Method::All);
}

#[test]
fn parse_env_check_default_required_keys() {
    let cli = Cli::parse_from(["runlens", "env", "check", "--env-file", "/tmp/x.env"]);
    assert_eq!(cli.env_file.as_deref(), Some(std::path::Path::new("/tmp/x.env")));
    let Command::Env(EnvCommand::Check(args)) = cli.command else {
        panic!("expected env check");
    };
    assert_eq!(
        args.require,
        vec!["OPENAI_API_KEY".to_string(), "ANTHROPIC_API_KEY".to_string()]
    );
}

#[test]
fn parse_env_get_flags() {
    let cli = Cli::parse_from(["runlens", "env", "get", "PORT", "--default", "8000", "--required"]);
    let Command::Env(EnvCommand::Get(args)) = cli.command else {
        panic!("expected env get");
    };
    assert_eq!(args.key, "PORT");
    assert_eq!(args.default.as_deref(), Some("8000"));
    assert!(args.required);
}

#[test]
fn ask_requires_a_prompt() {
    assert!(Cli::try_parse_from(["runlens", "ask"]).is_err());
}

#[test]
fn optional_settings_use_defaults() {
    let dir = TempDir::new().unwrap();
    let loader = EnvLoader::in_dir(dir.path(), ".env");

    let settings = OptionalSettings::resolve(&loader, &MemoryEnv::new()).unwrap();
    assert_eq!(
        settings,
        OptionalSettings {
            debug: false,
            port: 8000,
            environment: "development".to_string(),
        }
    );
}

#[test]
fn optional_settings_read_file_and_environment() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "DEBUG=TRUE\nPORT=9090\n").unwrap();
    let loader = EnvLoader::in_dir(dir.path(), ".env");
    let store = MemoryEnv::new().with("ENVIRONMENT", "staging");

    let settings = OptionalSettings::resolve(&loader, &store).unwrap();
    assert!(settings.debug);
    assert_eq!(settings.port, 9090);
    assert_eq!(settings.environment, "staging");
}

#[test]
fn optional_settings_reject_bad_port() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "PORT=eighty\n").unwrap();
    let loader = EnvLoader::in_dir(dir.path(), ".env");

    let err = OptionalSettings::resolve(&loader, &MemoryEnv::new()).unwrap_err();
    assert!(err.to_string().contains("PORT must be a port number"));
}

#[test]
fn mask_api_key_shows_prefix_only() {
    assert_eq!(mask_api_key(""), "(not set)");
    assert_eq!(mask_api_key("sk-1234567890abcdef"), "sk-1234567...");
    assert_eq!(mask_api_key("short"), "short...");
}

#[test]
fn method_all_runs_every_demo_in_order() {
    assert_eq!(
        demos(Method::All),
        &[Demo::Streaming, Demo::Inspect, Demo::Debug, Demo::Logged]
    );
    assert_eq!(demos(Method::Logged), &[Demo::Logged]);
}

#[test]
fn env_file_is_applied_without_an_async_runtime() {
    let _lock = env_lock();
    const KEY: &str = "RUNLENS_PREPARE_ENV_CHECK";
    assert!(std::env::var_os(KEY).is_none());
    assert!(tokio::runtime::Handle::try_current().is_err());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.env");
    fs::write(&path, format!("{KEY}=from-file\n")).unwrap();

    let cli = Cli::parse_from([
        "runlens".to_string(),
        "--env-file".to_string(),
        path.display().to_string(),
        "env".to_string(),
        "get".to_string(),
        KEY.to_string(),
    ]);
    let loader = prepare_environment(&cli).unwrap();

    assert_eq!(loader.path(), path.as_path());
    assert_eq!(std::env::var(KEY).unwrap(), "from-file");
    unsafe { std::env::remove_var(KEY) };
}

#[test]
fn env_file_help_explains_build_time_base_directory() {
    use clap::CommandFactory;

    let command = Cli::command();
    let env_file = command
        .get_arguments()
        .find(|arg| arg.get_id() == "env_file")
        .unwrap();
    let help = env_file.get_help().unwrap().to_string();
    assert!(help.contains("recorded at build time"), "{help}");
    assert!(help.contains("absolute path"), "{help}");
}
