use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Family of tools an intro phrase is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolFamily {
    Search,
    Calculation,
    Code,
    Api,
    Analysis,
}

impl ToolFamily {
    pub fn for_tool(tool_name: &str) -> Self {
        match tool_name {
            "calculator" => ToolFamily::Calculation,
            "code_executor" => ToolFamily::Code,
            "api_caller" => ToolFamily::Api,
            "data_analyzer" => ToolFamily::Analysis,
            _ => ToolFamily::Search,
        }
    }

    fn phrases(&self) -> &'static [&'static str] {
        match self {
            ToolFamily::Search => &[
                "I found some interesting information about {query}:",
                "Here's what I discovered regarding {query}:",
                "My search for {query} yielded these results:",
            ],
            ToolFamily::Calculation => &[
                "I've performed the calculation for you:",
                "Here's the mathematical result:",
                "The computation gives us:",
            ],
            ToolFamily::Code => &[
                "I've generated and executed the code:",
                "Here's the code solution:",
                "I created this implementation for you:",
            ],
            ToolFamily::Api => &[
                "I retrieved the data from the API:",
                "Here's the information from the external service:",
                "The API call returned:",
            ],
            ToolFamily::Analysis => &[
                "I've analyzed the data and found:",
                "Here are the analytical insights:",
                "The data analysis reveals:",
            ],
        }
    }
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("valid placeholder regex"))
}

/// Canned intro and closing phrases
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseTemplates;

impl ResponseTemplates {
    pub fn new() -> Self {
        Self
    }

    pub fn intro<R: Rng + ?Sized>(
        &self,
        family: ToolFamily,
        context: &HashMap<String, String>,
        rng: &mut R,
    ) -> String {
        let phrase = family
            .phrases()
            .choose(rng)
            .copied()
            .unwrap_or_default();
        Self::interpolate(phrase, context)
    }

    /// Replace `{key}` with its value; unknown keys are left as written
    pub fn interpolate(template: &str, context: &HashMap<String, String>) -> String {
        placeholder_regex()
            .replace_all(template, |caps: &regex::Captures<'_>| {
                match context.get(&caps[1]) {
                    Some(value) if !value.is_empty() => value.clone(),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    pub fn summary(&self, successful_tools: usize) -> String {
        match successful_tools {
            0 => "I encountered some challenges, but I'm ready to try a different approach if you'd like.".to_string(),
            1 => "I hope this information is helpful! Feel free to ask for more details or a different analysis.".to_string(),
            n => format!(
                "I used {} different tools to give you a comprehensive answer. Let me know if you need any clarification or additional information!",
                n
            ),
        }
    }
}
