//! Arithmetic tools: exact floating-point results the model cannot compute
//! reliably on its own.

use super::traits::{number_arg, ParamSpec, Tool, ToolDescriptor, ToolResult};
use crate::error::Result;
use serde_json::Value;
use tracing::info;

pub fn add(value1: f64, value2: f64) -> ToolResult {
    info!("add value1: {}, value2: {}", value1, value2);
    ToolResult::new((value1 + value2).to_string())
}

/// `value1 - value2`.
pub fn subtract(value1: f64, value2: f64) -> ToolResult {
    info!("subtract value1: {}, value2: {}", value1, value2);
    ToolResult::new((value1 - value2).to_string())
}

pub fn multiply(value1: f64, value2: f64) -> ToolResult {
    info!("multiply value1: {}, value2: {}", value1, value2);
    ToolResult::new((value1 * value2).to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

/// Two-operand arithmetic tool.
pub struct CalcTool {
    op: Operation,
    descriptor: ToolDescriptor,
}

impl CalcTool {
    pub fn new(op: Operation) -> Self {
        let descriptor = match op {
            Operation::Add => ToolDescriptor::new(
                "add",
                "use this method for addition",
                vec![
                    ParamSpec::number("value1", "first term"),
                    ParamSpec::number("value2", "second term"),
                ],
            ),
            Operation::Subtract => ToolDescriptor::new(
                "subtract",
                "use this method for subtraction",
                vec![
                    ParamSpec::number("value1", "number to subtract from"),
                    ParamSpec::number("value2", "the number to be subtracted"),
                ],
            ),
            Operation::Multiply => ToolDescriptor::new(
                "multiply",
                "use this method for multiplication",
                vec![
                    ParamSpec::number("value1", "first multiplier"),
                    ParamSpec::number("value2", "second factor"),
                ],
            ),
        };
        Self { op, descriptor }
    }
}

impl Tool for CalcTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, args: &Value) -> Result<ToolResult> {
        let name = &self.descriptor.name;
        let value1 = number_arg(name, args, "value1")?;
        let value2 = number_arg(name, args, "value2")?;
        Ok(match self.op {
            Operation::Add => add(value1, value2),
            Operation::Subtract => subtract(value1, value2),
            Operation::Multiply => multiply(value1, value2),
        })
    }
}
