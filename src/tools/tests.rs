use anyhow::Result;
use serde_json::{Value, json};

use super::arithmetic::{add, multiply, subtract};
use super::{LoggedTool, Tool, ToolRegistry};

struct Echo;

impl Tool for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Return the arguments unchanged."
    }

    fn parameters(&self) -> Value {
        json!({"type": "object"})
    }

    fn call(&self, arguments: &Value) -> Result<Value> {
        Ok(arguments.clone())
    }
}

fn calculator() -> ToolRegistry {
    ToolRegistry::new()
        .with(add())
        .with(multiply())
        .with(subtract())
}

#[test]
fn registry_preserves_registration_order() {
    let registry = calculator();
    assert_eq!(registry.names(), vec!["add", "multiply", "subtract"]);

    let definitions = registry.definitions();
    assert_eq!(definitions.len(), 3);
    assert_eq!(definitions[0].kind, "function");
    assert_eq!(definitions[2].function.name, "subtract");
    assert_eq!(definitions[2].function.description, "Subtract b from a.");
    assert_eq!(definitions[0].function.parameters["required"], json!(["a", "b"]));
}

#[test]
fn registering_same_name_replaces_in_place() {
    let mut registry = calculator();
    registry.register(LoggedTool::new(multiply()));
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.names(), vec!["add", "multiply", "subtract"]);
}

#[test]
fn invoke_runs_arithmetic_tools() {
    let registry = calculator();

    let sum = registry.invoke("add", r#"{"a": 15, "b": 27}"#).unwrap();
    assert_eq!(sum.name, "add");
    assert_eq!(sum.arguments, json!({"a": 15, "b": 27}));
    assert_eq!(sum.output, json!(42));

    let product = registry.invoke("multiply", r#"{"a": 42, "b": 2}"#).unwrap();
    assert_eq!(product.output, json!(84));

    let difference = registry.invoke("subtract", r#"{"a": 84, "b": 10}"#).unwrap();
    assert_eq!(difference.output, json!(74));
}

#[test]
fn invoke_accepts_integral_floats_and_numeric_strings() {
    let registry = calculator();
    let result = registry.invoke("add", r#"{"a": 2.0, "b": "3"}"#).unwrap();
    assert_eq!(result.output, json!(5));
}

#[test]
fn invoke_rejects_unknown_tool() {
    let err = calculator().invoke("divide", "{}").unwrap_err();
    assert!(err.to_string().contains("unknown tool 'divide'"));
}

#[test]
fn invoke_rejects_malformed_arguments() {
    let registry = calculator();

    let err = registry.invoke("add", "{not json").unwrap_err();
    assert!(err.to_string().contains("Invalid arguments for tool 'add'"));

    let err = registry.invoke("add", r#"{"a": 1}"#).unwrap_err();
    assert!(format!("{err:#}").contains("missing argument 'b'"));

    let err = registry.invoke("add", r#"{"a": 1.5, "b": 1}"#).unwrap_err();
    assert!(format!("{err:#}").contains("not an integer"));
}

#[test]
fn invoke_reports_overflow() {
    let err = calculator()
        .invoke("multiply", &format!(r#"{{"a": {}, "b": 2}}"#, i64::MAX))
        .unwrap_err();
    assert!(format!("{err:#}").contains("overflows"));
}

#[test]
fn empty_arguments_are_an_empty_object() {
    let registry = ToolRegistry::new().with(Echo);
    let result = registry.invoke("echo", "  ").unwrap();
    assert_eq!(result.output, json!({}));
}

#[test]
fn logged_tool_passes_through() {
    let logged = LoggedTool::new(add());
    assert_eq!(logged.name(), "add");
    assert_eq!(logged.description(), "Add two numbers.");
    assert_eq!(logged.call(&json!({"a": 1, "b": 2})).unwrap(), json!(3));
}

#[test]
fn invoke_rejects_floats_outside_i64_range() {
    let registry = calculator();

    for raw in [
        r#"{"a": 1e30, "b": 0}"#,
        r#"{"a": -1e30, "b": 0}"#,
        r#"{"a": 9223372036854775808.0, "b": 0}"#,
    ] {
        let err = registry.invoke("add", raw).unwrap_err();
        assert!(format!("{err:#}").contains("not an integer"), "{raw}");
    }

    let result = registry
        .invoke("add", r#"{"a": -9223372036854775808.0, "b": 1}"#)
        .unwrap();
    assert_eq!(result.output, json!(i64::MIN + 1));
}

#[test]
fn logged_registry_wraps_every_tool_in_order() {
    let logged = calculator().logged();
    assert_eq!(logged.names(), vec!["add", "multiply", "subtract"]);
    assert_eq!(logged.definitions(), calculator().definitions());

    let result = logged.invoke("subtract", r#"{"a": 84, "b": 10}"#).unwrap();
    assert_eq!(result.output, json!(74));
}
