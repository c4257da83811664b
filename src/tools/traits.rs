//! Tool trait and the declarative metadata handed to the chat model.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// JSON-schema type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Number,
}

/// One described parameter of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub kind: ParamType,
}

impl ParamSpec {
    pub fn number(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
            kind: ParamType::Number,
        }
    }
}

/// Name, usage text and parameters of a tool, as presented to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub usage_text: String,
    pub parameters: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn new(name: &str, usage_text: &str, parameters: Vec<ParamSpec>) -> Self {
        Self {
            name: name.into(),
            usage_text: usage_text.into(),
            parameters,
        }
    }

    /// JSON schema for the tool's parameters, properties in declaration order.
    pub fn parameters_schema(&self) -> Value {
        let mut properties = Map::new();
        for p in &self.parameters {
            properties.insert(
                p.name.clone(),
                json!({ "type": p.kind, "description": p.description }),
            );
        }
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// JSON schema of the value every tool returns.
    pub fn return_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "result": { "type": "string", "description": "Calculation result" }
            },
            "required": ["result"]
        })
    }
}

/// Value returned by every tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub result: String,
}

impl ToolResult {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
        }
    }
}

/// A callable the chat model may invoke.
pub trait Tool: Send + Sync {
    fn descriptor(&self) -> &ToolDescriptor;

    /// Bind `args` and run the tool.
    fn execute(&self, args: &Value) -> Result<ToolResult>;
}

/// Bind a numeric argument, accepting JSON numbers and numeric strings.
pub fn number_arg(tool: &str, args: &Value, name: &str) -> Result<f64> {
    let bad = |reason: String| Error::ToolArgs {
        tool: tool.to_string(),
        reason,
    };
    match args.get(name) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| bad(format!("'{}' is not representable as f64", name))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| bad(format!("'{}' is not a number: {:?}", name, s))),
        Some(other) => Err(bad(format!("'{}' must be a number, got {}", name, other))),
        None => Err(bad(format!("missing required argument '{}'", name))),
    }
}
