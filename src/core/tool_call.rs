use super::plan::PlannedTool;
use crate::tools::ToolReport;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};

/// A planned tool invocation with a per-turn identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool to execute
    pub name: String,
    /// Arguments to pass to the tool
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(id: String, name: String, arguments: Value) -> Self {
        Self {
            id,
            name,
            arguments,
        }
    }

    /// Number the plan entries `call_1`, `call_2`, ...
    pub fn from_plan(index: usize, planned: &PlannedTool) -> Self {
        Self::new(
            format!("call_{}", index + 1),
            planned.tool.clone(),
            planned.params.clone(),
        )
    }

    pub fn describe(&self) -> String {
        format!("{}({})", self.name, self.arguments)
    }
}

/// The outcome of one tool run within a turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub tool_name: String,
    pub report: ToolReport,
    /// Execution duration in milliseconds
    pub duration_ms: Option<u128>,
}

impl ToolOutput {
    pub fn success(tool_call_id: String, tool_name: String, report: ToolReport) -> Self {
        Self {
            tool_call_id,
            tool_name,
            report,
            duration_ms: None,
        }
    }

    pub fn error(tool_call_id: String, tool_name: String, error_msg: String) -> Self {
        Self::success(tool_call_id, tool_name, ToolReport::failure(error_msg))
    }

    pub fn is_error(&self) -> bool {
        self.report.is_error()
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(duration.as_millis());
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration_ms
            .map(|ms| Duration::from_millis(ms as u64))
            .unwrap_or_default()
    }

    /// Text stored in the observation step
    pub fn as_string(&self) -> String {
        serde_json::to_string(&self.report).unwrap_or_else(|_| self.report.headline().to_string())
    }
}

/// Tracks the execution of a tool call with timing information
#[derive(Debug)]
pub struct ToolExecution {
    pub tool_call: ToolCall,
    start_time: Instant,
}

impl ToolExecution {
    pub fn start(tool_call: ToolCall) -> Self {
        Self {
            tool_call,
            start_time: Instant::now(),
        }
    }

    pub fn complete(self, output: &Value) -> ToolOutput {
        let duration = self.start_time.elapsed();
        ToolOutput::success(
            self.tool_call.id,
            self.tool_call.name,
            ToolReport::from_value(output),
        )
        .with_duration(duration)
    }

    pub fn complete_with_error(self, error_msg: String) -> ToolOutput {
        let duration = self.start_time.elapsed();
        ToolOutput::error(self.tool_call.id, self.tool_call.name, error_msg).with_duration(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_plan_numbering() {
        let planned = PlannedTool {
            tool: "calculator".to_string(),
            params: json!({"expression": "2 + 2"}),
        };
        let call = ToolCall::from_plan(0, &planned);
        assert_eq!(call.id, "call_1");
        assert_eq!(call.name, "calculator");
        assert_eq!(call.arguments["expression"], "2 + 2");
    }

    #[test]
    fn test_execution_timing() {
        let call = ToolCall::new("call_1".to_string(), "test".to_string(), Value::Null);
        let output = ToolExecution::start(call).complete(&json!({"summary": "ok"}));
        assert!(output.duration_ms.is_some());
        assert!(!output.is_error());
        assert_eq!(output.report.summary.as_deref(), Some("ok"));
    }

    #[test]
    fn test_error_output() {
        let call = ToolCall::new("call_2".to_string(), "test".to_string(), Value::Null);
        let output = ToolExecution::start(call).complete_with_error("Tool not found".to_string());
        assert!(output.is_error());
        assert!(output.as_string().contains("Tool not found"));
    }
}
