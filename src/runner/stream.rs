use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_stream::try_stream;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::client::{
    ChatCompletionChunk, ChatMessage, DynAgentRuntime, FunctionCall, RunIntrospection, ToolCall,
};

use super::types::{RunEvent, RunRequest, ToolTrace, merge_introspection};

pub(super) fn run_events(
    runtime: Arc<DynAgentRuntime>,
    request: RunRequest,
    max_steps: u32,
) -> impl Stream<Item = Result<RunEvent>> + Send + 'static {
    try_stream! {
        let mut messages = vec![ChatMessage::user(request.input.clone())];
        let mut trace = ToolTrace::default();
        let mut introspection = RunIntrospection::default();
        let mut finished = false;

        for step in 1..=max_steps {
            let mut chunks = runtime
                .chat_completion_stream(request.completion(messages.clone()))
                .await?;

            let mut turn = TurnAccumulator::default();
            while let Some(chunk) = chunks.next().await {
                let chunk = chunk?;
                if let Some(token) = turn.absorb(chunk, &mut introspection)? {
                    yield RunEvent::Token(token);
                }
            }

            let (content, calls) = turn.finish()?;
            debug!(step, tool_calls = calls.len(), "streamed step finished");
            yield RunEvent::StepCompleted(step);

            if calls.is_empty() {
                messages.push(ChatMessage::assistant(Some(content.clone()), Vec::new()));
                let result = std::mem::take(&mut trace).into_result(
                    content,
                    step,
                    !request.tools.is_empty(),
                    std::mem::take(&mut introspection),
                    std::mem::take(&mut messages),
                );
                yield RunEvent::Finished(result);
                finished = true;
                break;
            }

            let text = (!content.is_empty()).then_some(content);
            messages.push(ChatMessage::assistant(text, calls.clone()));
            for call in calls {
                yield RunEvent::ToolCall {
                    name: call.function.name.clone(),
                    arguments: call.function.arguments.clone(),
                };
                let invocation = request
                    .tools
                    .invoke(&call.function.name, &call.function.arguments)?;
                yield RunEvent::ToolResult {
                    name: invocation.name.clone(),
                    output: invocation.output.clone(),
                };
                messages.push(ChatMessage::tool(call.id, invocation.output.to_string()));
                trace.record(invocation);
            }
        }

        if !finished {
            Err::<(), _>(anyhow!("Run did not finish within {max_steps} steps"))?;
        }
    }
}

#[derive(Debug, Default)]
struct PartialCall {
    id: String,
    name: String,
    arguments: String,
}

/// Collects the text and tool-call fragments of one streamed turn.
#[derive(Debug, Default)]
pub(super) struct TurnAccumulator {
    content: String,
    calls: Vec<PartialCall>,
}

impl TurnAccumulator {
    /// Folds `chunk` in and returns any new text it carried.
    ///
    /// Tool-call indices must arrive in order: each delta either extends a
    /// call already seen or starts the next one.
    pub(super) fn absorb(
        &mut self,
        chunk: ChatCompletionChunk,
        introspection: &mut RunIntrospection,
    ) -> Result<Option<String>> {
        merge_introspection(introspection, chunk.introspection);

        let mut token = String::new();
        for choice in chunk.choices {
            if let Some(text) = choice.delta.content {
                token.push_str(&text);
            }

            for delta in choice.delta.tool_calls {
                if delta.index > self.calls.len() {
                    return Err(anyhow!(
                        "Streamed tool call index {} skips ahead of {} known calls",
                        delta.index,
                        self.calls.len()
                    ));
                }
                if delta.index == self.calls.len() {
                    self.calls.push(PartialCall::default());
                }
                let slot = &mut self.calls[delta.index];
                if let Some(id) = delta.id {
                    slot.id = id;
                }
                if let Some(function) = delta.function {
                    if let Some(name) = function.name {
                        slot.name.push_str(&name);
                    }
                    if let Some(arguments) = function.arguments {
                        slot.arguments.push_str(&arguments);
                    }
                }
            }
        }

        if token.is_empty() {
            Ok(None)
        } else {
            self.content.push_str(&token);
            Ok(Some(token))
        }
    }

    pub(super) fn finish(self) -> Result<(String, Vec<ToolCall>)> {
        let calls = self
            .calls
            .into_iter()
            .enumerate()
            .map(|(index, partial)| {
                if partial.name.is_empty() {
                    return Err(anyhow!("Streamed tool call {index} has no function name"));
                }
                let id = if partial.id.is_empty() {
                    format!("call_{index}")
                } else {
                    partial.id
                };
                Ok(ToolCall {
                    id,
                    kind: "function".to_string(),
                    function: FunctionCall {
                        name: partial.name,
                        arguments: partial.arguments,
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((self.content, calls))
    }
}
