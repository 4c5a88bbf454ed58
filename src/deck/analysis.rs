//! Heuristic content analysis: word counts, sentence topics and a tone
//! guessed from the guidance text.

use serde::Serialize;
use std::fmt;

pub const MIN_SLIDES: usize = 3;
pub const MAX_SLIDES: usize = 20;
const WORDS_PER_SLIDE: usize = 100;
const TOPIC_CHARS: usize = 60;
const MAX_KEY_POINTS: usize = 10;
const KEY_POINT_MIN_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Persuasive,
    Technical,
    Educational,
    Sales,
}

impl Tone {
    pub fn from_guidance(guidance: &str) -> Self {
        let lower = guidance.to_lowercase();
        if lower.contains("pitch") || lower.contains("investor") {
            Tone::Persuasive
        } else if lower.contains("technical") {
            Tone::Technical
        } else if lower.contains("training") {
            Tone::Educational
        } else if lower.contains("sales") {
            Tone::Sales
        } else {
            Tone::Professional
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tone::Professional => "professional",
            Tone::Persuasive => "persuasive",
            Tone::Technical => "technical",
            Tone::Educational => "educational",
            Tone::Sales => "sales",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentAnalysis {
    pub word_count: usize,
    pub estimated_slides: usize,
    pub topics: Vec<String>,
    pub tone: Tone,
    pub structure: Vec<&'static str>,
    pub key_points: Vec<String>,
    /// Topics and slide count came from a provider answer rather than the heuristics
    pub ai_generated: bool,
}

pub fn clamp_slides(count: usize) -> usize {
    count.clamp(MIN_SLIDES, MAX_SLIDES)
}

pub fn estimate_slides(word_count: usize) -> usize {
    clamp_slides(word_count.div_ceil(WORDS_PER_SLIDE))
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Opening sentences cut to 60 characters, each marked with a trailing `...`
pub fn extract_topics(text: &str, count: usize) -> Vec<String> {
    sentences(text)
        .take(count)
        .map(|s| format!("{}...", s.chars().take(TOPIC_CHARS).collect::<String>()))
        .collect()
}

/// The first ten sentences longer than twenty characters
pub fn extract_key_points(text: &str) -> Vec<String> {
    sentences(text)
        .filter(|s| s.chars().count() > KEY_POINT_MIN_CHARS)
        .take(MAX_KEY_POINTS)
        .map(str::to_string)
        .collect()
}

pub fn suggest_structure(guidance: &str) -> Vec<&'static str> {
    let lower = guidance.to_lowercase();
    if lower.contains("pitch") || lower.contains("investor") {
        vec![
            "Title",
            "Problem",
            "Solution",
            "Market",
            "Business Model",
            "Team",
            "Financials",
            "Ask",
        ]
    } else if lower.contains("training") {
        vec![
            "Title",
            "Agenda",
            "Objectives",
            "Content Sections",
            "Practice",
            "Summary",
            "Q&A",
        ]
    } else if lower.contains("sales") {
        vec![
            "Title",
            "Challenge",
            "Solution",
            "Benefits",
            "Proof",
            "Pricing",
            "Next Steps",
        ]
    } else {
        vec!["Title", "Introduction", "Main Points", "Details", "Conclusion"]
    }
}

/// Local stand-in for the provider analysis
pub fn analyze_content(text: &str, guidance: &str) -> ContentAnalysis {
    let word_count = word_count(text);
    let estimated_slides = estimate_slides(word_count);

    ContentAnalysis {
        word_count,
        estimated_slides,
        topics: extract_topics(text, estimated_slides),
        tone: Tone::from_guidance(guidance),
        structure: suggest_structure(guidance),
        key_points: extract_key_points(text),
        ai_generated: false,
    }
}
