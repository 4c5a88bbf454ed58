use crate::core::{plan::ExecutionPlan, steps::AgentStep, tool_call::ToolOutput};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of one chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResult {
    /// The synthesized reply shown to the user
    pub reply: String,
    /// What the router decided to run
    pub plan: ExecutionPlan,
    /// One entry per planned tool, in plan order
    pub outputs: Vec<ToolOutput>,
    /// Steps recorded during this turn
    pub steps: Vec<AgentStep>,
    /// Total turn duration
    pub duration: Duration,
}

impl TurnResult {
    pub fn new(
        reply: String,
        plan: ExecutionPlan,
        outputs: Vec<ToolOutput>,
        steps: Vec<AgentStep>,
        duration: Duration,
    ) -> Self {
        Self {
            reply,
            plan,
            outputs,
            steps,
            duration,
        }
    }

    /// Generate a human-readable replay of the turn
    pub fn replay(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Agent Turn Trace ===".to_string());
        lines.push(format!("Duration: {:.2}s", self.duration.as_secs_f64()));
        lines.push(format!("Tools: {}", self.outputs.len()));

        lines.push(String::new());
        lines.push("--- Steps ---".to_string());

        for (idx, step) in self.steps.iter().enumerate() {
            lines.push(format!("{}. {}", idx + 1, step.describe()));
        }

        lines.push(String::new());
        lines.push("--- Reply ---".to_string());
        lines.push(self.reply.clone());

        lines.join("\n")
    }

    /// Detailed explanation with per-tool timings and full step data
    pub fn explain(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Agent Turn Explanation ===".to_string());
        lines.push(format!("Duration: {:.2}s", self.duration.as_secs_f64()));
        lines.push(format!("Reasoning: {}", self.plan.reasoning));

        if !self.outputs.is_empty() {
            lines.push(String::new());
            lines.push("--- Tool Timings ---".to_string());
            for output in &self.outputs {
                lines.push(format!(
                    "{} [{}]: {} ms{}",
                    output.tool_name,
                    output.tool_call_id,
                    output.duration().as_millis(),
                    if output.is_error() { " (error)" } else { "" }
                ));
            }
        }

        lines.push(String::new());
        lines.push("--- Detailed Steps ---".to_string());

        for (idx, step) in self.steps.iter().enumerate() {
            lines.push(format!("\n{}. {}", idx + 1, step.describe()));

            match step {
                AgentStep::Task { content } => {
                    lines.push(format!("   Content: {}", content));
                }
                AgentStep::Planning { plan, tools } => {
                    lines.push(format!("   Plan: {}", plan));
                    lines.push(format!("   Tools: {}", tools.join(", ")));
                }
                AgentStep::Action {
                    tool_name,
                    tool_call_id,
                    arguments,
                } => {
                    lines.push(format!("   Tool: {}", tool_name));
                    lines.push(format!("   Call ID: {}", tool_call_id));
                    lines.push(format!("   Arguments: {}", arguments));
                }
                AgentStep::Observation {
                    tool_call_id,
                    result,
                    is_error,
                } => {
                    lines.push(format!("   Call ID: {}", tool_call_id));
                    lines.push(format!("   Error: {}", is_error));
                    lines.push(format!("   Result: {}", result));
                }
                AgentStep::FinalAnswer { answer } => {
                    lines.push(format!("   Answer: {}", answer));
                }
            }
        }

        lines.join("\n")
    }

    /// Get count of actions (tool calls) executed
    pub fn action_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, AgentStep::Action { .. }))
            .count()
    }

    pub fn used_tools(&self) -> bool {
        !self.outputs.is_empty()
    }

    /// True when at least one tool ran and every tool failed
    pub fn all_failed(&self) -> bool {
        self.used_tools() && self.outputs.iter().all(ToolOutput::is_error)
    }

    /// Get all error observations
    pub fn errors(&self) -> Vec<&str> {
        self.outputs
            .iter()
            .filter_map(|o| o.report.error.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolReport;

    fn sample() -> TurnResult {
        let steps = vec![
            AgentStep::Task {
                content: "calculate 2 + 2".to_string(),
            },
            AgentStep::Action {
                tool_name: "calculator".to_string(),
                tool_call_id: "call_1".to_string(),
                arguments: serde_json::json!({"expression": "calculate 2 + 2"}),
            },
            AgentStep::FinalAnswer {
                answer: "4".to_string(),
            },
        ];
        let outputs = vec![
            ToolOutput::success(
                "call_1".to_string(),
                "calculator".to_string(),
                ToolReport::success("Calculated: 2 + 2 = 4", "**4**"),
            ),
            ToolOutput::error(
                "call_2".to_string(),
                "web_search".to_string(),
                "offline".to_string(),
            ),
        ];
        TurnResult::new(
            "4".to_string(),
            ExecutionPlan::default(),
            outputs,
            steps,
            Duration::from_secs(2),
        )
    }

    #[test]
    fn test_replay_format() {
        let replay = sample().replay();
        assert!(replay.contains("Duration: 2.00s"));
        assert!(replay.contains("Task"));
        assert!(replay.contains("Final Answer"));
    }

    #[test]
    fn test_counts_and_errors() {
        let result = sample();
        assert_eq!(result.action_count(), 1);
        assert_eq!(result.errors(), vec!["offline"]);
        assert!(!result.all_failed());
        assert!(result.explain().contains("web_search [call_2]"));
    }
}
