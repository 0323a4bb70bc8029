use anyhow::Result;

use crate::config::Config;
use crate::runner::{RunRequest, Runner, print_result_details, stream_to_console};
use crate::tools::arithmetic::{add, multiply, subtract};
use crate::tools::ToolRegistry;

use super::args::{Method, ToolsArgs};
use super::util::section_header;

const CHAINED_PROMPT: &str = "Calculate (15 + 27) * 2, then subtract 10 from the result";
const SHORT_PROMPT: &str = "Calculate (15 + 27) * 2";

pub(crate) async fn handle_tools(args: ToolsArgs, config: &Config, runner: &Runner) -> Result<()> {
    let model = args.model.unwrap_or_else(|| config.models.tools.clone());
    let prompt = args.prompt.as_deref();

    println!("🔍 TOOL CALL VISIBILITY");
    println!("   Runtime: {}", config.runtime.base_url);
    println!("   Model: {model}");

    for demo in demos(args.method) {
        match demo {
            Demo::Streaming => streaming(runner, &model, prompt.unwrap_or(CHAINED_PROMPT)).await?,
            Demo::Inspect => inspect(runner, &model, prompt.unwrap_or(CHAINED_PROMPT)).await?,
            Demo::Debug => debug_mode(runner, &model, prompt.unwrap_or(SHORT_PROMPT)).await?,
            Demo::Logged => logged(runner, &model, prompt.unwrap_or(SHORT_PROMPT)).await?,
        }
    }

    print_summary();
    Ok(())
}

/// One way of surfacing tool calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Demo {
    Streaming,
    Inspect,
    Debug,
    Logged,
}

pub(crate) fn demos(method: Method) -> &'static [Demo] {
    match method {
        Method::Streaming => &[Demo::Streaming],
        Method::Inspect => &[Demo::Inspect],
        Method::Debug => &[Demo::Debug],
        Method::Logged => &[Demo::Logged],
        Method::All => &[Demo::Streaming, Demo::Inspect, Demo::Debug, Demo::Logged],
    }
}

fn calculator() -> ToolRegistry {
    ToolRegistry::new()
        .with(add())
        .with(multiply())
        .with(subtract())
}

async fn streaming(runner: &Runner, model: &str, prompt: &str) -> Result<()> {
    section_header("🎯 STREAMING + TOOL LOGGING");

    let request = RunRequest::new(prompt, model)
        .with_tools(calculator())
        .streaming(true);
    stream_to_console(runner.run_stream(request)).await?;
    Ok(())
}

async fn inspect(runner: &Runner, model: &str, prompt: &str) -> Result<()> {
    section_header("🔍 INSPECT RESULT OBJECT");

    let request = RunRequest::new(prompt, model).with_tools(calculator());
    let result = runner.run(request).await?;
    print_result_details(&result);
    Ok(())
}

async fn debug_mode(runner: &Runner, model: &str, prompt: &str) -> Result<()> {
    section_header("🐛 DEBUG MODE");

    let tools = ToolRegistry::new().with(add()).with(multiply());
    let request = RunRequest::new(prompt, model)
        .with_tools(tools)
        .debug(true)
        .verbose(true);
    let result = runner.run(request).await?;
    println!("Final Output: {}", result.final_output);
    Ok(())
}

async fn logged(runner: &Runner, model: &str, prompt: &str) -> Result<()> {
    section_header("📊 CUSTOM LOGGING");

    let tools = ToolRegistry::new().with(add()).with(multiply()).logged();
    let result = runner.run(RunRequest::new(prompt, model).with_tools(tools)).await?;
    println!("Final Output: {}", result.final_output);
    Ok(())
}

fn print_summary() {
    section_header("📋 SUMMARY - HOW TO SEE TOOL CALLS");
    println!("1. 🎯 STREAMING + TOOL LOGGING:");
    println!("   - runlens tools --method streaming");
    println!("   - Tool calls and results print as the runtime requests them");
    println!();
    println!("2. 🔍 INSPECT RESULT OBJECT:");
    println!("   - runlens tools --method inspect");
    println!("   - Shows tools called, tool results, steps used and messages");
    println!();
    println!("3. 🐛 DEBUG MODE:");
    println!("   - runlens tools --method debug");
    println!("   - Sends debug/verbose flags; add -v for request logging");
    println!();
    println!("4. 📊 CUSTOM LOGGING:");
    println!("   - runlens tools --method logged");
    println!("   - Wraps each tool in a logging decorator");
}
