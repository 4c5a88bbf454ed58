use crate::{
    deck::provider::Provider,
    error::{DemoError, Result},
    services::pacing::{pacer_for, SharedPacer},
};
use std::env;
use std::path::PathBuf;

pub const PACING_VAR: &str = "AGENT_DECK_PACING";
pub const SEED_VAR: &str = "AGENT_DECK_SEED";
pub const OUTPUT_DIR_VAR: &str = "AGENT_DECK_OUTPUT_DIR";
pub const API_KEY_VAR: &str = "AGENT_DECK_API_KEY";
pub const PROVIDER_VAR: &str = "AGENT_DECK_PROVIDER";

/// Runtime settings shared by the chat agent and the deck generator
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Await artificial delays; off makes every pause return immediately
    pub pacing: bool,
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
    pub api_key: Option<String>,
    pub provider: Provider,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            pacing: true,
            seed: None,
            output_dir: PathBuf::from("."),
            api_key: None,
            provider: Provider::OpenAi,
        }
    }
}

impl RuntimeConfig {
    /// Load `.env` if present, then read the `AGENT_DECK_*` variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(PACING_VAR) {
            config.pacing = parse_switch(&raw).ok_or_else(|| {
                DemoError::Config(format!("{} must be on or off, got '{}'", PACING_VAR, raw))
            })?;
        }

        if let Some(raw) = lookup(SEED_VAR) {
            let seed = raw.trim().parse::<u64>().map_err(|e| {
                DemoError::Config(format!("{} must be an unsigned integer: {}", SEED_VAR, e))
            })?;
            config.seed = Some(seed);
        }

        if let Some(dir) = lookup(OUTPUT_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }

        config.api_key = lookup(API_KEY_VAR)
            .or_else(|| lookup("OPENAI_API_KEY"))
            .filter(|k| !k.trim().is_empty());

        if let Some(raw) = lookup(PROVIDER_VAR) {
            config.provider = raw.parse()?;
        }

        Ok(config)
    }

    pub fn pacer(&self) -> SharedPacer {
        pacer_for(self.pacing)
    }

    pub fn with_pacing(mut self, pacing: bool) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.pacing);
        assert!(config.seed.is_none());
        assert_eq!(config.provider, Provider::OpenAi);
    }

    #[test]
    fn test_overrides_and_key_fallback() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            (PACING_VAR, "off"),
            (SEED_VAR, "42"),
            (OUTPUT_DIR_VAR, "/tmp/decks"),
            ("OPENAI_API_KEY", "sk-fallback-key"),
            (PROVIDER_VAR, "nvidia"),
        ]))
        .unwrap();

        assert!(!config.pacing);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/decks"));
        assert_eq!(config.api_key.as_deref(), Some("sk-fallback-key"));
        assert_eq!(config.provider, Provider::Nvidia);
    }

    #[test]
    fn test_bad_values_are_config_errors() {
        let err = RuntimeConfig::from_lookup(lookup(&[(PACING_VAR, "sometimes")])).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(RuntimeConfig::from_lookup(lookup(&[(SEED_VAR, "-1")])).is_err());
    }
}
