//! Tools module containing the tool abstraction and the five mock tools

pub mod api_caller;
pub mod calculator;
pub mod code_executor;
pub mod data_analyzer;
pub mod function_factory;
pub mod report;
pub mod tool;
pub mod web_search;

pub use api_caller::ApiCallerTool;
pub use calculator::CalculatorTool;
pub use code_executor::CodeExecutorTool;
pub use data_analyzer::DataAnalyzerTool;
pub use function_factory::FunctionFactory;
pub use report::ToolReport;
pub use tool::{Tool, ToolRegistry};
pub use web_search::WebSearchTool;

use crate::services::pacing::SharedPacer;
use rand::{rngs::StdRng, SeedableRng};

/// JSON Schema for a parameter struct
pub(crate) fn schema_of<T: schemars::JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(&schema).unwrap_or_else(|_| {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    })
}

/// Each tool gets its own stream so one tool's draws don't shift another's.
pub(crate) fn seeded_rng(seed: Option<u64>, salt: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_mul(31).wrapping_add(salt)),
        None => StdRng::from_entropy(),
    }
}

/// A factory with all five mock tools registered
pub fn standard_factory(pacer: SharedPacer, seed: Option<u64>) -> FunctionFactory {
    let mut factory = FunctionFactory::new();
    factory.register_tool(WebSearchTool::new(pacer.clone(), seed));
    factory.register_tool(CalculatorTool::new(pacer.clone()));
    factory.register_tool(CodeExecutorTool::new(pacer.clone(), seed));
    factory.register_tool(ApiCallerTool::new(pacer.clone(), seed));
    factory.register_tool(DataAnalyzerTool::new(pacer, seed));
    factory
}
