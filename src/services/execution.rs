use crate::{
    core::{
        agent::{Agent, ToolActivity},
        plan::ExecutionPlan,
        steps::AgentStep,
        tool_call::{ToolCall, ToolExecution, ToolOutput},
    },
    insights::ToolFamily,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tracing::{debug, warn};

/// Pause between two tool runs within one turn
pub const TOOL_PAUSE: Duration = Duration::from_millis(500);
pub const MAX_LOG_ENTRIES: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Pretty-printed JSON payload
    pub data: Option<String>,
}

impl LogEntry {
    pub fn render(&self) -> String {
        let time = self.timestamp.format("%H:%M:%S");
        match &self.data {
            Some(data) => format!("[{}] {}\n{}", time, self.message, data),
            None => format!("[{}] {}", time, self.message),
        }
    }
}

/// Timestamped record of the latest tool invocations across turns
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    entries: VecDeque<LogEntry>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, message: impl Into<String>, data: Option<&Value>) {
        if self.entries.len() == MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            timestamp: Utc::now(),
            message: message.into(),
            data: data.map(|d| serde_json::to_string_pretty(d).unwrap_or_else(|_| d.to_string())),
        });
    }

    pub fn entries(&self) -> &VecDeque<LogEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Agent {
    /// Run every planned tool in order. A failing tool is recorded as an error
    /// output and the remaining tools still run.
    pub(crate) async fn execute_plan(&mut self, message: &str, plan: &ExecutionPlan) -> Vec<ToolOutput> {
        let mut outputs = Vec::with_capacity(plan.tools.len());

        for (index, planned) in plan.tools.iter().enumerate() {
            let tool_call = ToolCall::from_plan(index, planned);

            self.memory.add_step(AgentStep::Action {
                tool_name: tool_call.name.clone(),
                tool_call_id: tool_call.id.clone(),
                arguments: tool_call.arguments.clone(),
            });
            self.set_tool_activity(&tool_call.name, ToolActivity::Active);
            self.execution_log.record(
                format!("🔧 Executing {} with params:", tool_call.name),
                Some(&tool_call.arguments),
            );

            let execution = ToolExecution::start(tool_call.clone());
            let output = match self
                .function_factory
                .execute_function(&tool_call.name, tool_call.arguments.clone())
                .await
            {
                Ok(value) => {
                    self.execution_log
                        .record(format!("✅ {} completed:", tool_call.name), Some(&value));
                    execution.complete(&value)
                }
                Err(e) => {
                    warn!(
                        target: "agent_deck::tools",
                        tool = %tool_call.name,
                        error = %e,
                        "Tool failed"
                    );
                    execution.complete_with_error(e.to_string())
                }
            };

            self.set_tool_activity(&tool_call.name, ToolActivity::Idle);
            self.record_output(message, &output);
            self.memory.add_step(AgentStep::Observation {
                tool_call_id: output.tool_call_id.clone(),
                result: output.as_string(),
                is_error: output.is_error(),
            });
            outputs.push(output);

            self.pacer.pause(TOOL_PAUSE).await;
        }

        outputs
    }

    fn record_output(&mut self, message: &str, output: &ToolOutput) {
        let report = &output.report;
        let duration = output.duration();

        self.insights.metrics.record(
            &output.tool_name,
            duration,
            !report.is_error(),
            report.headline(),
        );
        self.insights
            .performance
            .record_tool_execution(&output.tool_name, duration);
        self.insights
            .context
            .add_result(&output.tool_name, report.headline());

        if !report.is_error() {
            let mut context = HashMap::new();
            context.insert("query".to_string(), message.to_string());
            let intro = self.insights.templates.intro(
                ToolFamily::for_tool(&output.tool_name),
                &context,
                &mut self.rng,
            );
            debug!(target: "agent_deck::tools", tool = %output.tool_name, "{}", intro);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_entry_render() {
        let mut log = ExecutionLog::new();
        log.record("🔧 Executing calculator with params:", Some(&json!({"expression": "1 + 1"})));
        log.record("done", None);

        assert_eq!(log.len(), 2);
        let rendered = log.entries()[0].render();
        assert!(rendered.contains("Executing calculator"));
        assert!(rendered.contains("\"expression\": \"1 + 1\""));
        assert!(log.entries()[1].data.is_none());
    }

    #[test]
    fn test_log_keeps_latest_entries() {
        let mut log = ExecutionLog::new();
        for i in 0..(MAX_LOG_ENTRIES + 3) {
            log.record(format!("entry {}", i), None);
        }
        assert_eq!(log.len(), MAX_LOG_ENTRIES);
        assert_eq!(log.entries()[0].message, "entry 3");
        assert_eq!(
            log.entries().back().map(|e| e.message.clone()),
            Some(format!("entry {}", MAX_LOG_ENTRIES + 2))
        );
    }
}
