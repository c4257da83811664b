pub mod calc;
pub mod clock;
pub mod risk;
pub mod traits;

pub use traits::{ParamSpec, ParamType, Tool, ToolDescriptor, ToolResult};

use crate::error::{Error, Result};
use calc::{CalcTool, Operation};
use clock::TimeTool;
use risk::RiskTool;

/// Ordered set of tools offered to the chat model.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

/// What to send back to the model after a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    /// JSON payload for the `function` message.
    pub content: String,
    pub success: bool,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Calculator, clock and incident-list tools.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(CalcTool::new(Operation::Add));
        registry.register(CalcTool::new(Operation::Subtract));
        registry.register(CalcTool::new(Operation::Multiply));
        registry.register(TimeTool::new());
        registry.register(RiskTool::new());
        registry
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.push(Box::new(tool));
    }

    pub fn descriptors(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    /// Invoke the named tool.
    pub fn invoke(&self, name: &str, args: &serde_json::Value) -> Result<ToolResult> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.descriptor().name == name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        tool.execute(args)
    }

    /// Invoke the named tool and render the outcome for the model. Binding
    /// failures become an error payload so the model can correct itself.
    pub fn execute(&self, name: &str, args: &serde_json::Value) -> ToolOutcome {
        match self.invoke(name, args) {
            Ok(result) => ToolOutcome {
                content: serde_json::json!(result).to_string(),
                success: true,
            },
            Err(e) => ToolOutcome {
                content: serde_json::json!({ "error": format!("Error: {}", e) }).to_string(),
                success: false,
            },
        }
    }
}
