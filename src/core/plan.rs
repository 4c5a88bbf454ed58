use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::OnceLock;

/// One tool the agent intends to run, with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedTool {
    pub tool: String,
    pub params: Value,
}

/// Ordered tool invocations derived from a single message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub tools: Vec<PlannedTool>,
    pub reasoning: String,
}

impl ExecutionPlan {
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.tool.as_str()).collect()
    }
}

/// Which parameter name a rule hands the raw message to
#[derive(Debug, Clone, Copy)]
enum ParamKey {
    Query,
    Expression,
    Intent,
}

impl ParamKey {
    fn wrap(self, message: &str) -> Value {
        match self {
            ParamKey::Query => json!({ "query": message }),
            ParamKey::Expression => json!({ "expression": message }),
            ParamKey::Intent => json!({ "intent": message }),
        }
    }
}

struct Rule {
    tool: &'static str,
    keywords: &'static [&'static str],
    param: ParamKey,
}

const RULES: [Rule; 5] = [
    Rule {
        tool: "web_search",
        keywords: &["search", "find", "news", "current", "latest"],
        param: ParamKey::Query,
    },
    Rule {
        tool: "calculator",
        keywords: &["calculate", "math"],
        param: ParamKey::Expression,
    },
    Rule {
        tool: "code_executor",
        keywords: &["code", "program", "chart", "graph", "visualize"],
        param: ParamKey::Intent,
    },
    Rule {
        tool: "api_caller",
        keywords: &["api", "weather", "stock", "currency"],
        param: ParamKey::Intent,
    },
    Rule {
        tool: "data_analyzer",
        keywords: &["analyze", "data", "statistics", "trend"],
        param: ParamKey::Intent,
    },
];

fn arithmetic_hint() -> &'static Regex {
    static HINT: OnceLock<Regex> = OnceLock::new();
    HINT.get_or_init(|| Regex::new(r"\d+.*[+\-*/].*\d+").expect("Failed to compile arithmetic regex"))
}

/// Rule-based stand-in for LLM planning: substring tests against fixed
/// keyword sets. Categories are independent, so one message can select
/// several tools; they are always planned in rule order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToolRouter;

impl ToolRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, message: &str) -> ExecutionPlan {
        let lower = message.to_lowercase();
        let mut plan = ExecutionPlan::default();
        let mut reasons = Vec::new();

        for rule in &RULES {
            let mut matched: Vec<&str> = rule
                .keywords
                .iter()
                .copied()
                .filter(|keyword| lower.contains(keyword))
                .collect();

            if rule.tool == "calculator" && arithmetic_hint().is_match(message) {
                matched.push("arithmetic");
            }

            if !matched.is_empty() {
                reasons.push(format!("{} ({})", rule.tool, matched.join(", ")));
                plan.tools.push(PlannedTool {
                    tool: rule.tool.to_string(),
                    params: rule.param.wrap(message),
                });
            }
        }

        plan.reasoning = if reasons.is_empty() {
            "No tool keywords matched; answering directly".to_string()
        } else {
            format!("Matched {}", reasons.join("; "))
        };

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools_for(message: &str) -> Vec<String> {
        ToolRouter::new()
            .analyze(message)
            .tools
            .into_iter()
            .map(|t| t.tool)
            .collect()
    }

    #[test]
    fn test_single_category_vocabulary() {
        assert_eq!(tools_for("Search for rust crates"), vec!["web_search"]);
        assert_eq!(tools_for("What's the LATEST?"), vec!["web_search"]);
        assert_eq!(tools_for("calculate my taxes"), vec!["calculator"]);
        assert_eq!(tools_for("15 * 8"), vec!["calculator"]);
        assert_eq!(tools_for("write a program"), vec!["code_executor"]);
        assert_eq!(tools_for("weather in Tokyo"), vec!["api_caller"]);
        assert_eq!(tools_for("show statistics"), vec!["data_analyzer"]);
    }

    #[test]
    fn test_categories_are_independent() {
        assert_eq!(
            tools_for("Search for latest AI developments and analyze trends"),
            vec!["web_search", "data_analyzer"]
        );
        assert_eq!(
            tools_for("Generate prime numbers and create a chart"),
            vec!["code_executor"]
        );
        // "visualization" does not contain "visualize"
        assert_eq!(
            tools_for("Calculate compound interest and create visualization"),
            vec!["calculator"]
        );
        assert_eq!(
            tools_for("stock chart and news"),
            vec!["web_search", "code_executor", "api_caller"]
        );
    }

    #[test]
    fn test_no_match_and_params() {
        let plan = ToolRouter::new().analyze("hello there");
        assert!(plan.is_empty());
        assert!(plan.reasoning.contains("No tool keywords"));

        let plan = ToolRouter::new().analyze("find 2 + 2");
        assert_eq!(plan.tool_names(), vec!["web_search", "calculator"]);
        assert_eq!(plan.tools[0].params["query"], "find 2 + 2");
        assert_eq!(plan.tools[1].params["expression"], "find 2 + 2");
        assert!(plan.reasoning.contains("arithmetic"));
    }

    #[test]
    fn test_substring_semantics() {
        // "database" contains "data"; "apiary" contains "api"
        assert_eq!(
            tools_for("database apiary"),
            vec!["api_caller", "data_analyzer"]
        );
    }
}
