use super::steps::AgentStep;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Step log for the agent; every step is also emitted as a tracing event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentMemory {
    steps: Vec<AgentStep>,
}

impl AgentMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step to memory
    pub fn add_step(&mut self, step: AgentStep) {
        let description = step.describe();
        info!(target: "agent_deck::steps", "{}", description);
        self.steps.push(step);
    }

    /// Get all steps
    pub fn steps(&self) -> &[AgentStep] {
        &self.steps
    }

    /// Steps recorded since `index`, used to slice out one turn
    pub fn steps_since(&self, index: usize) -> &[AgentStep] {
        self.steps.get(index..).unwrap_or(&[])
    }

    /// Get the last step
    pub fn last_step(&self) -> Option<&AgentStep> {
        self.steps.last()
    }

    pub fn clear_steps(&mut self) {
        self.steps.clear();
    }

    /// Get number of steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_steps() {
        let mut memory = AgentMemory::new();
        assert!(memory.is_empty());
        memory.add_step(AgentStep::Task {
            content: "Test task".to_string(),
        });
        assert_eq!(memory.step_count(), 1);
        assert!(matches!(memory.last_step(), Some(AgentStep::Task { .. })));
    }

    #[test]
    fn test_slices() {
        let mut memory = AgentMemory::new();
        memory.add_step(AgentStep::Task {
            content: "first".to_string(),
        });
        let mark = memory.step_count();
        memory.add_step(AgentStep::Action {
            tool_name: "calculator".to_string(),
            tool_call_id: "1".to_string(),
            arguments: serde_json::Value::Null,
        });
        memory.add_step(AgentStep::Observation {
            tool_call_id: "1".to_string(),
            result: "failed".to_string(),
            is_error: true,
        });

        assert_eq!(memory.steps_since(mark).len(), 2);
        assert!(memory.steps_since(10).is_empty());
    }
}
