use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

const MAX_LOGGED_ERRORS: usize = 50;
const STATS_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Network,
    Computation,
    Parsing,
    General,
}

impl ErrorCategory {
    pub fn of(message: &str) -> Self {
        let message = message.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| message.contains(w));

        if mentions(&["network", "fetch", "timeout"]) {
            ErrorCategory::Network
        } else if mentions(&["calculation", "math", "expression"]) {
            ErrorCategory::Computation
        } else if mentions(&["parse", "invalid", "format"]) {
            ErrorCategory::Parsing
        } else {
            ErrorCategory::General
        }
    }

    pub fn strategies(&self) -> &'static [&'static str] {
        match self {
            ErrorCategory::Network => &[
                "Retry the request after a short delay",
                "Use cached data if available",
                "Switch to alternative data source",
            ],
            ErrorCategory::Computation => &[
                "Simplify the calculation",
                "Break down into smaller steps",
                "Use alternative algorithm",
            ],
            ErrorCategory::Parsing => &[
                "Clean and sanitize input",
                "Use fuzzy matching",
                "Request clarification from user",
            ],
            ErrorCategory::General => &["Try a different approach"],
        }
    }

    pub fn can_retry(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Computation)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Computation => "computation",
            ErrorCategory::Parsing => "parsing",
            ErrorCategory::General => "general",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggedError {
    pub message: String,
    pub category: ErrorCategory,
    pub timestamp: DateTime<Utc>,
    /// Tool that produced the error, if any
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecoveryAdvice {
    pub error: String,
    pub suggestion: String,
    pub can_retry: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorStats {
    pub total_errors: usize,
    pub recent_errors: usize,
    pub error_types: BTreeMap<ErrorCategory, usize>,
    pub last_error: Option<LoggedError>,
}

/// Classifies error messages and picks a canned recovery suggestion
#[derive(Debug, Default)]
pub struct ErrorCategorizer {
    log: VecDeque<LoggedError>,
}

impl ErrorCategorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        message: &str,
        source: Option<&str>,
        rng: &mut R,
    ) -> RecoveryAdvice {
        let category = ErrorCategory::of(message);
        self.log.push_back(LoggedError {
            message: message.to_string(),
            category,
            timestamp: Utc::now(),
            source: source.map(str::to_string),
        });
        if self.log.len() > MAX_LOGGED_ERRORS {
            self.log.pop_front();
        }

        let strategy = category
            .strategies()
            .choose(rng)
            .copied()
            .unwrap_or("Try a different approach");

        RecoveryAdvice {
            error: format!("I encountered an issue: {}", message),
            suggestion: format!("I suggest we {}.", strategy.to_lowercase()),
            can_retry: category.can_retry(),
        }
    }

    pub fn stats(&self) -> ErrorStats {
        let recent: Vec<&LoggedError> = self
            .log
            .iter()
            .skip(self.log.len().saturating_sub(STATS_WINDOW))
            .collect();

        let mut error_types = BTreeMap::new();
        for error in &recent {
            *error_types.entry(error.category).or_insert(0) += 1;
        }

        ErrorStats {
            total_errors: self.log.len(),
            recent_errors: recent.len(),
            error_types,
            last_error: self.log.back().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_categories() {
        assert_eq!(ErrorCategory::of("Network unreachable"), ErrorCategory::Network);
        assert_eq!(
            ErrorCategory::of("Calculation failed: Division by zero"),
            ErrorCategory::Computation
        );
        assert_eq!(ErrorCategory::of("could not parse reply"), ErrorCategory::Parsing);
        assert_eq!(ErrorCategory::of("something odd"), ErrorCategory::General);
    }

    #[test]
    fn test_advice() {
        let mut categorizer = ErrorCategorizer::new();
        let mut rng = StdRng::seed_from_u64(1);
        let advice = categorizer.handle("request timeout", Some("api_caller"), &mut rng);
        assert!(advice.can_retry);
        assert!(advice.suggestion.starts_with("I suggest we "));
        assert!(advice.suggestion.ends_with('.'));
        assert_eq!(advice.error, "I encountered an issue: request timeout");

        let advice = categorizer.handle("mystery", None, &mut rng);
        assert_eq!(advice.suggestion, "I suggest we try a different approach.");
        assert!(!advice.can_retry);
    }

    #[test]
    fn test_log_and_stats_windows() {
        let mut categorizer = ErrorCategorizer::new();
        let mut rng = StdRng::seed_from_u64(2);
        for i in 0..60 {
            let message = if i % 2 == 0 { "fetch failed" } else { "bad format" };
            categorizer.handle(message, None, &mut rng);
        }
        let stats = categorizer.stats();
        assert_eq!(stats.total_errors, 50);
        assert_eq!(stats.recent_errors, 20);
        assert_eq!(stats.error_types[&ErrorCategory::Network], 10);
        assert_eq!(stats.error_types[&ErrorCategory::Parsing], 10);
        assert_eq!(stats.last_error.map(|e| e.message), Some("bad format".to_string()));
    }
}
