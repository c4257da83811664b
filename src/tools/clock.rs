//! Wall-clock tool.

use super::traits::{Tool, ToolDescriptor, ToolResult};
use crate::error::Result;
use serde_json::Value;
use tracing::info;

/// chrono rendering of `yyyy-MM-dd HH-mm-ss`.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

/// Current process-local time.
pub fn current_time() -> ToolResult {
    info!("current time");
    ToolResult::new(chrono::Local::now().format(TIME_FORMAT).to_string())
}

pub struct TimeTool {
    descriptor: ToolDescriptor,
}

impl TimeTool {
    pub fn new() -> Self {
        Self {
            descriptor: ToolDescriptor::new(
                "getCurrentTime",
                "use this method to get current time, it will return time in format yyyy-MM-dd HH-mm-ss",
                Vec::new(),
            ),
        }
    }
}

impl Default for TimeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for TimeTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, _args: &Value) -> Result<ToolResult> {
        Ok(current_time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn assert_shape(s: &str) {
        assert_eq!(s.len(), 19, "unexpected length: {s}");
        for (i, c) in s.chars().enumerate() {
            match i {
                4 | 7 | 13 | 16 => assert_eq!(c, '-', "{s}"),
                10 => assert_eq!(c, ' ', "{s}"),
                _ => assert!(c.is_ascii_digit(), "{s}"),
            }
        }
    }

    #[test]
    fn formats_as_date_then_dashed_time() {
        assert_shape(&current_time().result);
    }

    #[test]
    fn parses_back_with_the_same_format() {
        let s = current_time().result;
        assert!(chrono::NaiveDateTime::parse_from_str(&s, TIME_FORMAT).is_ok());
    }

    #[test]
    fn samples_are_non_decreasing() {
        let first = current_time().result;
        std::thread::sleep(Duration::from_millis(1100));
        let second = current_time().result;
        assert!(first <= second, "{first} > {second}");
    }

    #[test]
    fn ignores_arguments() {
        let out = TimeTool::new()
            .execute(&serde_json::json!({ "ignored": "x" }))
            .unwrap();
        assert_shape(&out.result);
    }
}
