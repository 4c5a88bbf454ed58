use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents a single step of one chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentStep {
    /// Message provided by the user
    Task { content: String },
    /// The router's decision about which tools to run
    Planning { plan: String, tools: Vec<String> },
    /// A planned tool invocation
    Action {
        tool_name: String,
        tool_call_id: String,
        arguments: Value,
    },
    /// The result of a tool execution
    Observation {
        tool_call_id: String,
        result: String,
        is_error: bool,
    },
    /// The synthesized reply shown to the user
    FinalAnswer { answer: String },
}

impl AgentStep {
    /// Get a human-readable description of the step
    pub fn describe(&self) -> String {
        match self {
            AgentStep::Task { content } => format!("🧭 Task: {}", content),
            AgentStep::Planning { plan, .. } => format!("🧩 Plan: {}", plan),
            AgentStep::Action {
                tool_name,
                arguments,
                ..
            } => {
                format!("🔧 Action: {}({})", tool_name, arguments)
            }
            AgentStep::Observation {
                result, is_error, ..
            } => {
                if *is_error {
                    format!("❌ Error: {}", result)
                } else {
                    format!("👁 Observation: {}", result)
                }
            }
            AgentStep::FinalAnswer { answer } => format!("✅ Final Answer: {}", answer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_description() {
        let step = AgentStep::Action {
            tool_name: "calculator".to_string(),
            tool_call_id: "call_1".to_string(),
            arguments: serde_json::json!({"expression": "2 + 2"}),
        };
        assert_eq!(step.describe(), r#"🔧 Action: calculator({"expression":"2 + 2"})"#);
    }

    #[test]
    fn test_error_observation_description() {
        let step = AgentStep::Observation {
            tool_call_id: "call_2".to_string(),
            result: "boom".to_string(),
            is_error: true,
        };
        assert_eq!(step.describe(), "❌ Error: boom");
    }
}
