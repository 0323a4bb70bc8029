use anyhow::{Result, anyhow};
use colored::Colorize;
use serde_json::{Value, json};

use super::Tool;

/// Integer tool of two arguments, `a` and `b`.
#[derive(Debug, Clone, Copy)]
pub struct BinaryIntTool {
    name: &'static str,
    description: &'static str,
    op: fn(i64, i64) -> Option<i64>,
}

impl BinaryIntTool {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        op: fn(i64, i64) -> Option<i64>,
    ) -> Self {
        Self {
            name,
            description,
            op,
        }
    }

    pub fn apply(&self, a: i64, b: i64) -> Result<i64> {
        (self.op)(a, b).ok_or_else(|| anyhow!("{}({a}, {b}) overflows", self.name))
    }
}

impl Tool for BinaryIntTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "a": {"type": "integer"},
                "b": {"type": "integer"}
            },
            "required": ["a", "b"]
        })
    }

    fn call(&self, arguments: &Value) -> Result<Value> {
        let a = int_arg(arguments, "a")?;
        let b = int_arg(arguments, "b")?;

        println!("{} {}({a}, {b})", "🔧 TOOL CALLED:".yellow().bold(), self.name);
        let result = self.apply(a, b)?;
        println!("{} {result}", "🔧 TOOL RESULT:".yellow().bold());

        Ok(json!(result))
    }
}

fn int_arg(arguments: &Value, key: &str) -> Result<i64> {
    let value = arguments
        .get(key)
        .ok_or_else(|| anyhow!("missing argument '{key}'"))?;

    // Models occasionally send integral floats or numeric strings.
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_f64))
            .ok_or_else(|| anyhow!("argument '{key}' is not an integer: {n}")),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| anyhow!("argument '{key}' is not an integer: {s:?}")),
        other => Err(anyhow!("argument '{key}' is not an integer: {other}")),
    }
}

/// Whole floats inside the `i64` range; anything else would saturate on cast.
fn integral_f64(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

pub fn add() -> BinaryIntTool {
    BinaryIntTool::new("add", "Add two numbers.", i64::checked_add)
}

pub fn multiply() -> BinaryIntTool {
    BinaryIntTool::new("multiply", "Multiply two numbers.", i64::checked_mul)
}

pub fn subtract() -> BinaryIntTool {
    BinaryIntTool::new("subtract", "Subtract b from a.", i64::checked_sub)
}
