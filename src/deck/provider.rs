use super::analysis::{
    clamp_slides, estimate_slides, extract_key_points, suggest_structure, word_count,
    ContentAnalysis, Tone,
};
use crate::error::{DemoError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::info;

/// Keys at most this long are treated as placeholders
const MIN_LIVE_KEY_LEN: usize = 10;

/// Chat-completion providers a deck analysis could be delegated to. Requests
/// are only ever built, never sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Google,
    Nvidia,
}

/// A fully described HTTP request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl Provider {
    pub fn key(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Google => "google",
            Provider::Nvidia => "nvidia",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI (GPT)",
            Provider::Google => "Google (Gemini)",
            Provider::Nvidia => "NVIDIA (Llama 3.3 70B)",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions",
            Provider::Google => {
                "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
            }
            Provider::Nvidia => "https://integrate.api.nvidia.com/v1/chat/completions",
        }
    }

    fn prompt(&self, text: &str, guidance: &str) -> String {
        let guidance_line = if guidance.trim().is_empty() {
            String::new()
        } else {
            format!("Guidance: {}", guidance)
        };

        match self {
            Provider::Nvidia => format!(
                "Analyze this text for a PowerPoint presentation. {}\n\nText: {}\n\nProvide:\n\
                 1. Estimated slide count (3-20 slides based on content)\n\
                 2. Key topics for each slide with clear titles\n\
                 3. Presentation tone (professional, technical, sales, etc.)\n\
                 4. Suggested structure and flow\n\
                 5. Main points and supporting details for each slide\n\n\
                 Format your response clearly with numbered sections for easy parsing.",
                guidance_line, text
            ),
            Provider::OpenAi | Provider::Google => format!(
                "Analyze this text for a PowerPoint presentation. {}\n\nText: {}\n\nProvide:\n\
                 1. Estimated slide count\n2. Key topics for each slide\n3. Presentation tone\n\
                 4. Suggested structure",
                guidance_line, text
            ),
        }
    }

    pub fn request_body(&self, text: &str, guidance: &str) -> Value {
        let prompt = self.prompt(text, guidance);
        match self {
            Provider::OpenAi => json!({
                "model": "gpt-4",
                "messages": [{ "role": "user", "content": prompt }],
                "temperature": 0.7,
                "max_tokens": 1000
            }),
            Provider::Google => json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }),
            Provider::Nvidia => json!({
                "model": "meta/llama-3.3-70b-instruct",
                "messages": [{ "role": "user", "content": prompt }],
                "temperature": 0.7,
                "max_tokens": 2048
            }),
        }
    }

    pub fn build_request(&self, text: &str, guidance: &str, api_key: &str) -> ProviderRequest {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        let url = match self {
            Provider::Google => format!("{}?key={}", self.endpoint(), api_key),
            Provider::OpenAi | Provider::Nvidia => {
                headers.push(("Authorization".to_string(), format!("Bearer {}", api_key)));
                self.endpoint().to_string()
            }
        };
        if *self == Provider::Nvidia {
            headers.push(("Accept".to_string(), "application/json".to_string()));
        }

        ProviderRequest {
            url,
            headers,
            body: self.request_body(text, guidance),
        }
    }

    /// Answer text inside a provider's JSON response
    pub fn response_text<'a>(&self, response: &'a Value) -> Option<&'a str> {
        match self {
            Provider::Google => response
                .pointer("/candidates/0/content/parts/0/text")
                .and_then(Value::as_str),
            Provider::OpenAi | Provider::Nvidia => response
                .pointer("/choices/0/message/content")
                .and_then(Value::as_str),
        }
    }

    /// Log the call a live integration would make. Returns whether the key
    /// looked real enough to mention.
    pub fn announce_call(&self, api_key: &str) -> bool {
        if api_key.chars().count() <= MIN_LIVE_KEY_LEN {
            return false;
        }
        let prefix: String = api_key.chars().take(8).collect();
        info!(
            target: "agent_deck::deck",
            "Would call {} API with key: {}...",
            self.key(),
            prefix
        );
        true
    }
}

impl FromStr for Provider {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "google" => Ok(Provider::Google),
            "nvidia" => Ok(Provider::Nvidia),
            other => Err(DemoError::Config(format!("Unsupported provider: {}", other))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn slide_count_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\d+.*slide").expect("valid slide count regex"))
}

fn first_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid number regex"))
}

fn numbered_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.").expect("valid numbered line regex"))
}

fn bullet_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-•\d.\s]+").expect("valid bullet prefix regex"))
}

/// List items after the first line mentioning topics or slides
fn topics_from_lines(lines: &[&str], slide_count: usize) -> Vec<String> {
    let mut topics = Vec::new();
    let mut in_topic_section = false;

    for line in lines {
        let lower = line.to_lowercase();
        if lower.contains("topic") || lower.contains("slide") {
            in_topic_section = true;
        }
        if in_topic_section
            && (line.contains('-') || line.contains('•') || numbered_line_regex().is_match(line))
        {
            let topic = bullet_prefix_regex().replace(line, "").trim().to_string();
            if topic.chars().count() > 5 {
                topics.push(topic);
            }
        }
        if topics.len() >= slide_count {
            break;
        }
    }

    if topics.is_empty() {
        topics = (1..=slide_count).map(|i| format!("Topic {}", i)).collect();
    }
    topics.truncate(slide_count);
    topics
}

/// Read a provider-style answer into an analysis. The slide count comes from
/// the first line that mentions a number and a slide; otherwise it is
/// estimated from the content.
pub fn analysis_from_response(response: &str, text: &str, guidance: &str) -> ContentAnalysis {
    let lines: Vec<&str> = response.lines().collect();
    let words = word_count(text);

    let estimated_slides = lines
        .iter()
        .find(|line| slide_count_regex().is_match(line))
        .and_then(|line| first_number_regex().find(line))
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .map(clamp_slides)
        .unwrap_or_else(|| estimate_slides(words));

    ContentAnalysis {
        word_count: words,
        estimated_slides,
        topics: topics_from_lines(&lines, estimated_slides),
        tone: Tone::from_guidance(guidance),
        structure: suggest_structure(guidance),
        key_points: extract_key_points(text),
        ai_generated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_and_parsing() {
        assert_eq!(Provider::Nvidia.display_name(), "NVIDIA (Llama 3.3 70B)");
        assert_eq!("Google".parse::<Provider>().unwrap(), Provider::Google);
        assert!("anthropic".parse::<Provider>().is_err());
    }

    #[test]
    fn test_request_shapes() {
        let google = Provider::Google.build_request("text", "", "secret-key");
        assert!(google.url.ends_with("?key=secret-key"));
        assert!(google.body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Text: text"));

        let nvidia = Provider::Nvidia.build_request("text", "pitch", "secret-key");
        assert_eq!(nvidia.body["max_tokens"], 2048);
        assert!(nvidia
            .headers
            .contains(&("Authorization".to_string(), "Bearer secret-key".to_string())));
    }

    #[test]
    fn test_response_text() {
        let body = json!({"choices": [{"message": {"content": "7 slides"}}]});
        assert_eq!(Provider::OpenAi.response_text(&body), Some("7 slides"));
        assert_eq!(Provider::Google.response_text(&body), None);
    }

    #[test]
    fn test_short_keys_are_not_announced() {
        assert!(!Provider::OpenAi.announce_call("short"));
        assert!(Provider::OpenAi.announce_call("sk-1234567890abcdef"));
    }

    #[test]
    fn test_analysis_from_response() {
        let response = "I recommend 25 slides for this material.\n\
                        2. Key topics:\n\
                        - Opening the market\n\
                        - Why now matters\n\
                        - ok\n\
                        3. Tone: persuasive";
        let analysis = analysis_from_response(response, "some words here", "investor pitch");
        assert_eq!(analysis.estimated_slides, 20);
        assert!(analysis.ai_generated);
        assert_eq!(analysis.tone, Tone::Persuasive);
        assert_eq!(analysis.topics[0], "Key topics:");
        assert_eq!(analysis.topics.last().map(String::as_str), Some("Tone: persuasive"));
        assert!(analysis.topics.contains(&"Opening the market".to_string()));
        assert!(!analysis.topics.contains(&"ok".to_string()));
    }

    #[test]
    fn test_analysis_falls_back_to_numbered_topics() {
        let analysis = analysis_from_response("no useful content", "a b c", "");
        assert_eq!(analysis.estimated_slides, 3);
        assert_eq!(analysis.topics, vec!["Topic 1", "Topic 2", "Topic 3"]);
    }
}
