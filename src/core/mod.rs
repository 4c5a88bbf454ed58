pub mod agent;
pub mod conversation;
pub mod memory;
pub mod plan;
pub mod steps;
pub mod tool_call;

pub use crate::types::result::TurnResult;
pub use agent::{Agent, AgentStatus, ToolActivity};
pub use conversation::{ChatMessage, Conversation, Role};
pub use memory::AgentMemory;
pub use plan::{ExecutionPlan, PlannedTool, ToolRouter};
pub use steps::AgentStep;
pub use tool_call::{ToolCall, ToolExecution, ToolOutput};
