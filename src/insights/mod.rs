//! Auxiliary bookkeeping kept alongside the agent. Nothing in a turn's
//! outcome depends on these.

pub mod context;
pub mod metrics;
pub mod recovery;
pub mod templates;

pub use context::{ContextTracker, RelevantContext};
pub use metrics::{PerformanceMonitor, PerformanceReport, ToolMetrics, ToolStats};
pub use recovery::{ErrorCategorizer, ErrorCategory, ErrorStats, RecoveryAdvice};
pub use templates::{ResponseTemplates, ToolFamily};

/// Everything the agent records about its own turns
#[derive(Debug, Default)]
pub struct Insights {
    pub metrics: ToolMetrics,
    pub performance: PerformanceMonitor,
    pub context: ContextTracker,
    pub errors: ErrorCategorizer,
    pub templates: ResponseTemplates,
}
