//! Drives a prompt through the agent runtime.
//!
//! When the runtime asks for a tool, the call is answered from the request's
//! `ToolRegistry` and the conversation continues, up to a step limit.

mod render;
mod stream;
mod types;

use std::sync::Arc;

use anyhow::{Result, anyhow, bail};
use tracing::debug;

use crate::client::{ChatMessage, DynAgentRuntime, RunIntrospection};

pub use render::{print_result_details, stream_to_console};
pub use types::{RunEvent, RunOutput, RunRequest, RunResult, RunStream};

use types::{ToolTrace, merge_introspection};

pub struct Runner {
    runtime: Arc<DynAgentRuntime>,
    max_steps: u32,
}

impl Runner {
    pub fn new(runtime: Arc<DynAgentRuntime>, max_steps: u32) -> Self {
        Self { runtime, max_steps }
    }

    /// Runs `request`, streaming or not according to its `stream` flag.
    pub async fn execute(&self, request: RunRequest) -> Result<RunOutput> {
        if request.stream {
            Ok(RunOutput::Stream(self.run_stream(request)))
        } else {
            self.run(request).await.map(RunOutput::Complete)
        }
    }

    pub async fn run(&self, request: RunRequest) -> Result<RunResult> {
        let max_steps = self.steps_for(&request);
        let mut messages = vec![ChatMessage::user(request.input.clone())];
        let mut trace = ToolTrace::default();
        let mut introspection = RunIntrospection::default();

        for step in 1..=max_steps {
            let response = self
                .runtime
                .chat_completion(request.completion(messages.clone()))
                .await?;
            merge_introspection(&mut introspection, response.introspection);

            let choice = response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("Runtime returned no choices"))?;
            debug!(
                step,
                finish_reason = ?choice.finish_reason,
                tool_calls = choice.message.tool_calls.len(),
                "runtime step finished"
            );

            let message = choice.message;
            if message.tool_calls.is_empty() {
                let final_output = message.text().to_string();
                messages.push(ChatMessage::assistant(message.content, Vec::new()));
                return Ok(trace.into_result(
                    final_output,
                    step,
                    !request.tools.is_empty(),
                    introspection,
                    messages,
                ));
            }

            messages.push(ChatMessage::assistant(
                message.content,
                message.tool_calls.clone(),
            ));
            for call in &message.tool_calls {
                let invocation = request
                    .tools
                    .invoke(&call.function.name, &call.function.arguments)?;
                messages.push(ChatMessage::tool(
                    call.id.clone(),
                    invocation.output.to_string(),
                ));
                trace.record(invocation);
            }
        }

        bail!("Run did not finish within {max_steps} steps")
    }

    /// Streams events for `request`. Nothing is sent until the stream is polled.
    pub fn run_stream(&self, request: RunRequest) -> RunStream {
        let max_steps = self.steps_for(&request);
        Box::pin(stream::run_events(
            Arc::clone(&self.runtime),
            request,
            max_steps,
        ))
    }

    fn steps_for(&self, request: &RunRequest) -> u32 {
        request.max_steps.unwrap_or(self.max_steps)
    }
}
