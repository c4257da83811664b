//! Static incident list exposed to the model as business data.

use super::traits::{Tool, ToolDescriptor, ToolResult};
use crate::error::Result;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;
use tracing::info;

/// One recorded risk incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskRecord {
    pub id: &'static str,
    /// yyyy-MM-dd
    pub date: &'static str,
    pub reason: &'static str,
    pub lost_amount: u64,
}

impl fmt::Display for RiskRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}|{}", self.id, self.date, self.reason, self.lost_amount)
    }
}

pub const RISK_RECORDS: [RiskRecord; 4] = [
    RiskRecord {
        id: "EVE-1",
        date: "2025-04-11",
        reason: "theft",
        lost_amount: 1000,
    },
    RiskRecord {
        id: "EVE-2",
        date: "2025-03-11",
        reason: "flooded",
        lost_amount: 5000,
    },
    RiskRecord {
        id: "EVE-3",
        date: "2025-02-11",
        reason: "hardware failure",
        lost_amount: 6000,
    },
    RiskRecord {
        id: "EVE-4",
        date: "2025-01-11",
        reason: "PC failure",
        lost_amount: 3000,
    },
];

static RENDERED: LazyLock<String> = LazyLock::new(|| render(&RISK_RECORDS));

/// Each record followed by `;`.
pub fn render(records: &[RiskRecord]) -> String {
    records.iter().map(|r| format!("{};", r)).collect()
}

pub fn risk_incidents() -> ToolResult {
    info!("risks list");
    ToolResult::new(RENDERED.as_str())
}

pub struct RiskTool {
    descriptor: ToolDescriptor,
}

impl RiskTool {
    pub fn new() -> Self {
        Self {
            descriptor: ToolDescriptor::new(
                "getRiskIncidents",
                "use this method to get the list of incidents, it will return the list of incidents in the format ID|date(yyyy-MM-dd)|reason|lostMoney|;",
                Vec::new(),
            ),
        }
    }
}

impl Default for RiskTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for RiskTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, _args: &Value) -> Result<ToolResult> {
        Ok(risk_incidents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: &str = "EVE-1|2025-04-11|theft|1000;EVE-2|2025-03-11|flooded|5000;EVE-3|2025-02-11|hardware failure|6000;EVE-4|2025-01-11|PC failure|3000;";

    #[test]
    fn renders_the_fixed_incident_list() {
        assert_eq!(risk_incidents().result, EXPECTED);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = risk_incidents();
        for _ in 0..5 {
            assert_eq!(risk_incidents(), first);
        }
        assert_eq!(RiskTool::new().execute(&Value::Null).unwrap(), first);
    }

    #[test]
    fn empty_list_renders_empty() {
        assert_eq!(render(&[]), "");
    }
}
