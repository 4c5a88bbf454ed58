use super::{schema_of, seeded_rng, Tool, ToolReport};
use crate::schemas::Validator;
use crate::services::pacing::{jittered, SharedPacer};
use rand::{rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Mutex;

const FINDINGS: [&str; 5] = [
    "Recent developments in AI show significant progress in multimodal capabilities.",
    "New research indicates improved efficiency in large language models.",
    "Industry leaders are focusing on responsible AI development and deployment.",
    "Breakthrough in neural architecture design shows promise for edge computing.",
    "Latest studies reveal enhanced reasoning capabilities in transformer models.",
];

const SOURCES: [&str; 3] = ["example.com", "research.ai", "tech-news.com"];

/// Parameters for a simulated search
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct WebSearchParams {
    /// Free-text query, usually the user's whole message
    pub query: String,
}

/// Pretends to search the web and returns one canned finding
#[derive(Debug)]
pub struct WebSearchTool {
    pacer: SharedPacer,
    rng: Mutex<StdRng>,
}

impl WebSearchTool {
    pub fn new(pacer: SharedPacer, seed: Option<u64>) -> Self {
        Self {
            pacer,
            rng: Mutex::new(seeded_rng(seed, 11)),
        }
    }
}

impl Tool for WebSearchTool {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn display_name(&self) -> &'static str {
        "Web Search"
    }

    fn description(&self) -> &'static str {
        "Search the web for current information (simulated results)"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        schema_of::<WebSearchParams>()
    }

    fn execute(
        &self,
        parameters: serde_json::Value,
    ) -> Pin<
        Box<
            dyn std::future::Future<Output = Result<serde_json::Value, crate::DemoError>>
                + Send
                + '_,
        >,
    > {
        Box::pin(async move {
            let params: WebSearchParams =
                Validator::SerdeFirst.validate(self.name(), parameters)?;

            let (latency, finding) = {
                let mut rng = self.rng.lock().map_err(|_| {
                    crate::DemoError::ToolExecution("search state poisoned".to_string())
                })?;
                let latency = jittered(1000, 2000, &mut *rng);
                let finding = FINDINGS.choose(&mut *rng).copied().unwrap_or(FINDINGS[0]);
                (latency, finding)
            };
            self.pacer.pause(latency).await;

            ToolReport::success(
                "Found relevant information from web search",
                format!(
                    "**Search Results for \"{}\":**\n\n{}\n\n*Note: This is a demo with simulated results.*",
                    params.query, finding
                ),
            )
            .with_sources(&SOURCES)
            .into_value()
        })
    }
}
