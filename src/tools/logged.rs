use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use serde_json::Value;
use tracing::info;

use super::{Tool, ToolRegistry};

/// Wraps a tool and reports every call and result before passing it through.
pub struct LoggedTool {
    inner: Arc<dyn Tool>,
}

impl LoggedTool {
    pub fn new<T>(inner: T) -> Self
    where
        T: Tool + 'static,
    {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn wrap(inner: Arc<dyn Tool>) -> Self {
        Self { inner }
    }
}

impl ToolRegistry {
    /// Copy of this registry with every tool wrapped in a [`LoggedTool`],
    /// keeping the order.
    pub fn logged(&self) -> ToolRegistry {
        let tools = self
            .tools
            .iter()
            .map(|tool| Arc::new(LoggedTool::wrap(Arc::clone(tool))) as Arc<dyn Tool>)
            .collect();
        ToolRegistry { tools }
    }
}

impl Tool for LoggedTool {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn parameters(&self) -> Value {
        self.inner.parameters()
    }

    fn call(&self, arguments: &Value) -> Result<Value> {
        let name = self.inner.name();
        println!("{} {name}({arguments})", "📊 LOGGED TOOL CALL:".cyan().bold());
        info!(tool = name, %arguments, "tool call");

        let output = self.inner.call(arguments)?;

        println!("{} {output}", "📊 LOGGED TOOL RESULT:".cyan().bold());
        info!(tool = name, %output, "tool result");
        Ok(output)
    }
}
