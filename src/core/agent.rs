use super::{
    conversation::{ChatMessage, Conversation},
    memory::AgentMemory,
    plan::{ExecutionPlan, ToolRouter},
    steps::AgentStep,
};
use crate::{
    config::RuntimeConfig,
    error::{DemoError, Result},
    insights::Insights,
    services::{
        execution::ExecutionLog,
        pacing::SharedPacer,
        response::{simple_response, synthesize_response, ReplySection},
    },
    tools::{standard_factory, FunctionFactory},
    types::result::TurnResult,
};
use rand::{rngs::StdRng, SeedableRng};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{error, info};

const PROCESSING_FAILURE_REPLY: &str =
    "❌ Sorry, I encountered an error while processing your request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStatus {
    Ready,
    Thinking,
    Error,
}

impl AgentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AgentStatus::Ready => "Ready",
            AgentStatus::Thinking => "Processing...",
            AgentStatus::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolActivity {
    Active,
    Idle,
}

/// Keyword-routed chat agent over the mock tools
#[derive(Debug)]
pub struct Agent {
    pub(crate) function_factory: FunctionFactory,
    router: ToolRouter,
    pub(crate) pacer: SharedPacer,
    pub(crate) memory: AgentMemory,
    conversation: Conversation,
    status: AgentStatus,
    tool_activity: BTreeMap<String, ToolActivity>,
    pub(crate) rng: StdRng,
    pub(crate) insights: Insights,
    pub(crate) execution_log: ExecutionLog,
}

impl Agent {
    pub fn new(function_factory: FunctionFactory, pacer: SharedPacer) -> Self {
        let tool_activity = function_factory
            .tool_names()
            .into_iter()
            .map(|name| (name.to_string(), ToolActivity::Idle))
            .collect();

        Self {
            function_factory,
            router: ToolRouter::new(),
            pacer,
            memory: AgentMemory::new(),
            conversation: Conversation::new(),
            status: AgentStatus::Ready,
            tool_activity,
            rng: StdRng::from_entropy(),
            insights: Insights::default(),
            execution_log: ExecutionLog::new(),
        }
    }

    /// Seed the agent's own choices (canned replies, suggestions)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Agent with the five standard tools, paced and seeded per `config`
    pub fn from_config(config: &RuntimeConfig) -> Self {
        let pacer = config.pacer();
        let agent = Self::new(standard_factory(pacer.clone(), config.seed), pacer);
        match config.seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        }
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn tool_activity(&self, tool_name: &str) -> Option<ToolActivity> {
        self.tool_activity.get(tool_name).copied()
    }

    pub(crate) fn set_tool_activity(&mut self, tool_name: &str, activity: ToolActivity) {
        self.tool_activity.insert(tool_name.to_string(), activity);
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn memory(&self) -> &AgentMemory {
        &self.memory
    }

    pub fn insights(&self) -> &Insights {
        &self.insights
    }

    pub fn execution_log(&self) -> &ExecutionLog {
        &self.execution_log
    }

    pub fn function_factory(&self) -> &FunctionFactory {
        &self.function_factory
    }

    /// Route a message to tools, run them and reply
    pub async fn handle_message(&mut self, text: &str) -> Result<TurnResult> {
        let message = text.trim();
        if message.is_empty() {
            return Err(DemoError::Validation("Message cannot be empty".to_string()));
        }
        let plan = self.router.analyze(message);
        self.run_turn(message, plan).await
    }

    /// Run a turn against a caller-supplied plan instead of the router's
    pub async fn handle_with_plan(&mut self, text: &str, plan: ExecutionPlan) -> Result<TurnResult> {
        let message = text.trim();
        if message.is_empty() {
            return Err(DemoError::Validation("Message cannot be empty".to_string()));
        }
        self.run_turn(message, plan).await
    }

    async fn run_turn(&mut self, message: &str, plan: ExecutionPlan) -> Result<TurnResult> {
        let start = Instant::now();
        let first_step = self.memory.step_count();

        self.conversation.push(ChatMessage::user(message));
        self.memory.add_step(AgentStep::Task {
            content: message.to_string(),
        });
        self.status = AgentStatus::Thinking;
        self.track_context(message);

        match self.process(message, &plan).await {
            Ok((reply, outputs)) => {
                self.memory.add_step(AgentStep::FinalAnswer {
                    answer: reply.clone(),
                });
                self.conversation.push(ChatMessage::agent(reply.clone()));

                let duration = start.elapsed();
                self.insights.performance.record_response(duration);
                if !outputs.is_empty() && outputs.iter().all(|o| o.is_error()) {
                    self.insights.performance.record_error();
                }
                let successes = outputs.iter().filter(|o| !o.is_error()).count();
                if !outputs.is_empty() {
                    self.execution_log
                        .record(format!("📝 {}", self.insights.templates.summary(successes)), None);
                }
                self.status = AgentStatus::Ready;

                info!(
                    target: "agent_deck::steps",
                    tools = outputs.len(),
                    successes,
                    elapsed_ms = duration.as_millis() as u64,
                    "Turn complete"
                );

                Ok(TurnResult::new(
                    reply,
                    plan,
                    outputs,
                    self.memory.steps_since(first_step).to_vec(),
                    duration,
                ))
            }
            Err(e) => {
                error!(target: "agent_deck::steps", error = %e, "Error processing message");
                self.conversation
                    .push(ChatMessage::agent(PROCESSING_FAILURE_REPLY));
                self.insights.performance.record_response(start.elapsed());
                self.insights.performance.record_error();
                self.status = AgentStatus::Error;
                Err(e)
            }
        }
    }

    async fn process(
        &mut self,
        message: &str,
        plan: &ExecutionPlan,
    ) -> Result<(String, Vec<super::tool_call::ToolOutput>)> {
        self.memory.add_step(AgentStep::Planning {
            plan: plan.reasoning.clone(),
            tools: plan.tool_names().iter().map(|t| t.to_string()).collect(),
        });

        if plan.is_empty() {
            return Ok((simple_response(&mut self.rng).to_string(), Vec::new()));
        }

        for planned in &plan.tools {
            if !planned.params.is_object() {
                return Err(DemoError::Validation(format!(
                    "Parameters for {} must be a JSON object",
                    planned.tool
                )));
            }
        }

        let outputs = self.execute_plan(message, plan).await;

        let suggestions: Vec<Option<String>> = outputs
            .iter()
            .map(|output| {
                output.report.error.as_deref().map(|error| {
                    self.insights
                        .errors
                        .handle(error, Some(&output.tool_name), &mut self.rng)
                        .suggestion
                })
            })
            .collect();

        let sections: Vec<ReplySection<'_>> = outputs
            .iter()
            .zip(&suggestions)
            .map(|(output, suggestion)| ReplySection {
                display_name: self.function_factory.display_name(&output.tool_name),
                report: &output.report,
                suggestion: suggestion.as_deref(),
            })
            .collect();
        let reply = synthesize_response(&sections);

        Ok((reply, outputs))
    }

    fn track_context(&mut self, message: &str) {
        self.insights.context.add_topic(message);
        for entity in message
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| w.len() > 1 && w.chars().next().is_some_and(char::is_uppercase))
        {
            self.insights.context.add_entity(entity, "proper_noun");
        }
    }

    /// Forget the conversation and step history; metrics are kept
    pub fn reset(&mut self) {
        self.conversation.clear();
        self.memory.clear_steps();
        self.status = AgentStatus::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::plan::PlannedTool;
    use crate::services::pacing::pacer_for;
    use serde_json::json;

    fn quiet_agent() -> Agent {
        let pacer = pacer_for(false);
        Agent::new(standard_factory(pacer.clone(), Some(7)), pacer).with_seed(7)
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let mut agent = quiet_agent();
        let err = agent.handle_message("   ").await.unwrap_err();
        assert!(matches!(err, DemoError::Validation(_)));
        assert!(agent.conversation().is_empty());
    }

    #[tokio::test]
    async fn test_simple_response_without_tools() {
        let mut agent = quiet_agent();
        let result = agent.handle_message("hello there").await.unwrap();
        assert!(!result.used_tools());
        assert!(crate::services::response::is_simple_response(&result.reply));
        assert_eq!(agent.conversation().len(), 2);
        assert_eq!(agent.status(), AgentStatus::Ready);
    }

    #[tokio::test]
    async fn test_calculation_turn() {
        let mut agent = quiet_agent();
        let result = agent.handle_message("calculate 12 * 3").await.unwrap();
        assert!(result.reply.contains("✅ **Calculator**: Calculated: 12 * 3 = 36"));
        assert_eq!(result.action_count(), 1);
        assert_eq!(agent.tool_activity("calculator"), Some(ToolActivity::Idle));
        assert_eq!(agent.execution_log().len(), 3);
        assert_eq!(agent.insights().metrics.stats("calculator").unwrap().counters.executions, 1);
    }

    #[tokio::test]
    async fn test_non_object_params_fail_the_turn() {
        let mut agent = quiet_agent();
        let plan = ExecutionPlan {
            tools: vec![PlannedTool {
                tool: "calculator".to_string(),
                params: json!("2 + 2"),
            }],
            reasoning: "manual".to_string(),
        };
        assert!(agent.handle_with_plan("2 + 2", plan).await.is_err());
        assert_eq!(agent.status(), AgentStatus::Error);
        assert_eq!(
            agent.conversation().last().map(|m| m.text.as_str()),
            Some(PROCESSING_FAILURE_REPLY)
        );
    }
}
