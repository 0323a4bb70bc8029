use std::pin::Pin;

use anyhow::Result;
use futures::Stream;
use serde_json::{Value, json};

use crate::client::{ChatCompletionRequest, ChatMessage, RunIntrospection};
use crate::tools::{ToolInvocation, ToolRegistry};

/// A prompt plus everything bound to it for one run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input: String,
    pub model: String,
    pub tools: ToolRegistry,
    pub stream: bool,
    pub debug: bool,
    pub verbose: bool,
    pub mcp_servers: Vec<String>,
    /// Overrides the runner's step limit.
    pub max_steps: Option<u32>,
}

impl RunRequest {
    pub fn new(input: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            model: model.into(),
            tools: ToolRegistry::new(),
            stream: false,
            debug: false,
            verbose: false,
            mcp_servers: Vec::new(),
            max_steps: None,
        }
    }

    pub fn with_tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_mcp_servers<I, S>(mut self, servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mcp_servers.extend(servers.into_iter().map(Into::into));
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub(super) fn completion(&self, messages: Vec<ChatMessage>) -> ChatCompletionRequest {
        let mut request = ChatCompletionRequest::new(self.model.clone(), messages);
        request.tools = self.tools.definitions();
        request.mcp_servers = self.mcp_servers.clone();
        request.debug = self.debug;
        request.verbose = self.verbose;
        request
    }
}

/// Outcome of a finished run.
///
/// Only `final_output` is guaranteed. The remaining fields are reported by
/// some runtimes and not others, and are checked individually.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    pub final_output: String,
    pub tools_called: Option<Vec<String>>,
    pub tool_results: Option<Vec<Value>>,
    pub steps_used: Option<u32>,
    pub intents: Option<Vec<Value>>,
    pub messages: Option<Vec<ChatMessage>>,
}

/// Incremental output of a streamed run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Token(String),
    ToolCall { name: String, arguments: String },
    ToolResult { name: String, output: Value },
    StepCompleted(u32),
    Finished(RunResult),
}

pub type RunStream = Pin<Box<dyn Stream<Item = Result<RunEvent>> + Send>>;

/// What `Runner::execute` hands back, depending on the request's stream flag.
pub enum RunOutput {
    Complete(RunResult),
    Stream(RunStream),
}

/// Tool calls made locally during one run.
#[derive(Debug, Clone, Default)]
pub(super) struct ToolTrace {
    names: Vec<String>,
    results: Vec<Value>,
}

impl ToolTrace {
    pub(super) fn record(&mut self, invocation: ToolInvocation) {
        self.results.push(json!({
            "name": invocation.name,
            "arguments": invocation.arguments,
            "result": invocation.output,
        }));
        self.names.push(invocation.name);
    }

    /// Combines the local trace with whatever the runtime reported; runtime
    /// values win when present.
    pub(super) fn into_result(
        self,
        final_output: String,
        steps: u32,
        tools_bound: bool,
        introspection: RunIntrospection,
        messages: Vec<ChatMessage>,
    ) -> RunResult {
        let (local_names, local_results) = if tools_bound {
            (Some(self.names), Some(self.results))
        } else {
            (None, None)
        };

        RunResult {
            final_output,
            tools_called: introspection.tools_called.or(local_names),
            tool_results: introspection.tool_results.or(local_results),
            steps_used: introspection.steps_used.or(Some(steps)),
            intents: introspection.intents,
            messages: Some(messages),
        }
    }
}

pub(super) fn merge_introspection(into: &mut RunIntrospection, from: RunIntrospection) {
    if from.tools_called.is_some() {
        into.tools_called = from.tools_called;
    }
    if from.tool_results.is_some() {
        into.tool_results = from.tool_results;
    }
    if from.steps_used.is_some() {
        into.steps_used = from.steps_used;
    }
    if from.intents.is_some() {
        into.intents = from.intents;
    }
}
