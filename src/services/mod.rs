pub mod execution;
pub mod pacing;
pub mod response;

pub use execution::{ExecutionLog, LogEntry, TOOL_PAUSE};
pub use pacing::{pacer_for, NoPacing, Pacer, SharedPacer, TokioPacer};
