//! agent-deck: a keyword-routed mock chat agent and a text-to-PowerPoint wizard
//!
//! The agent picks tools from the words in a message, runs each one in turn
//! and folds their reports into a single markdown reply. Nothing talks to a
//! real model; every tool is simulated. The deck wizard collects text, AI
//! settings and a template over four steps and writes a `.pptx` file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use agent_deck::{Agent, RuntimeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RuntimeConfig::from_env()?.with_pacing(false);
//!     let mut agent = Agent::from_config(&config);
//!
//!     let turn = agent.handle_message("calculate 12 * 3").await?;
//!     println!("{}", turn.reply);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod deck;
pub mod error;
pub mod insights;
pub mod schemas;
pub mod services;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::RuntimeConfig;
pub use core::{
    Agent, AgentMemory, AgentStatus, AgentStep, ExecutionPlan, PlannedTool, ToolActivity,
    ToolCall, ToolExecution, ToolOutput, ToolRouter,
};
pub use deck::{DeckGenerator, DeckSession, GeneratedPresentation, Provider, TemplateKind};
pub use error::{DemoError, Result};
pub use schemas::validator::Validator;
pub use services::pacing::{pacer_for, NoPacing, Pacer, SharedPacer, TokioPacer};
pub use tools::{standard_factory, FunctionFactory, Tool, ToolReport};
pub use types::TurnResult;

pub use core as agent;
pub use schemas::validator;
