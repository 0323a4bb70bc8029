use std::io::{self, Write};

use anyhow::{Result, anyhow};
use colored::Colorize;
use futures::StreamExt;
use tracing::debug;

use super::types::{RunEvent, RunResult, RunStream};

/// Drains `stream`, printing tokens and tool activity as they arrive.
pub async fn stream_to_console(mut stream: RunStream) -> Result<RunResult> {
    let mut stdout = io::stdout();
    let mut result = None;
    let mut mid_line = false;

    while let Some(event) = stream.next().await {
        match event? {
            RunEvent::Token(token) => {
                print!("{token}");
                stdout.flush()?;
                mid_line = !token.ends_with('\n');
            }
            RunEvent::ToolCall { name, arguments } => {
                if mid_line {
                    println!();
                    mid_line = false;
                }
                println!("{} {name}({arguments})", "→ tool call:".yellow().bold());
            }
            RunEvent::ToolResult { name, output } => {
                println!("{} {name} = {output}", "← tool result:".green().bold());
            }
            RunEvent::StepCompleted(step) => debug!(step, "step completed"),
            RunEvent::Finished(finished) => {
                if mid_line {
                    println!();
                    mid_line = false;
                }
                result = Some(finished);
            }
        }
    }

    result.ok_or_else(|| anyhow!("Stream ended before the run finished"))
}

/// Prints the final output and whichever introspection fields are present.
pub fn print_result_details(result: &RunResult) {
    println!("{} {}", "Final Output:".bold(), result.final_output);

    if let Some(tools) = &result.tools_called {
        println!("\nTools called: {tools:?}");
    }

    if let Some(results) = &result.tool_results {
        println!("Tool results:");
        for (idx, value) in results.iter().enumerate() {
            println!("  {}. {value}", idx + 1);
        }
    }

    if let Some(steps) = result.steps_used {
        println!("Steps used: {steps}");
    }

    if let Some(intents) = &result.intents {
        println!("Intents: {intents:?}");
    }

    if let Some(messages) = &result.messages {
        println!("\nTotal messages: {}", messages.len());
        for (idx, message) in messages.iter().enumerate() {
            let calls = message
                .tool_calls
                .iter()
                .map(|call| format!("{}({})", call.function.name, call.function.arguments))
                .collect::<Vec<_>>();
            if calls.is_empty() {
                println!("Message {}: {:?} {}", idx + 1, message.role, message.text());
            } else {
                println!("Message {}: {:?} calls {}", idx + 1, message.role, calls.join(", "));
            }
        }
    }
}
