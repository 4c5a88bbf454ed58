use crate::{DemoError, Result};
use jsonschema::{Draft, JSONSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validation strategies for tool parameters
#[derive(Debug, Clone)]
pub enum Validator {
    /// Fast validation using serde
    SerdeFirst,
    /// Strict validation using JSON Schema, then serde
    Strict(StrictValidator),
}

impl Validator {
    /// Validate and deserialize the parameters of `tool_name` into type T
    pub fn validate<T: DeserializeOwned>(&self, tool_name: &str, params: Value) -> Result<T> {
        if let Validator::Strict(validator) = self {
            validator.check(tool_name, &params)?;
        }
        serde_first_validate(params)
    }
}

/// Fast serde-first validator
fn serde_first_validate<T: DeserializeOwned>(params: Value) -> Result<T> {
    serde_path_to_error::deserialize(params).map_err(|e| {
        DemoError::Validation(format!(
            "Parameter validation failed at {}: {}",
            e.path(),
            e
        ))
    })
}

/// A registered schema, compiled once
#[derive(Clone)]
enum CompiledSchema {
    Ready(Arc<JSONSchema>),
    /// The schema did not compile; calls to the tool are refused with this message
    Broken(String),
}

/// Strict JSON Schema validator keyed by tool name
#[derive(Clone, Default)]
pub struct StrictValidator {
    schemas: HashMap<String, CompiledSchema>,
}

impl fmt::Debug for StrictValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tools: Vec<&String> = self.schemas.keys().collect();
        tools.sort();
        f.debug_struct("StrictValidator").field("tools", &tools).finish()
    }
}

impl StrictValidator {
    /// Create a new strict validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and register the schema for a tool
    pub fn register_schema(&mut self, tool_name: &str, schema: Value) {
        let compiled = match JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema)
        {
            Ok(compiled) => CompiledSchema::Ready(Arc::new(compiled)),
            Err(err) => {
                let message = format!(
                    "Failed to prepare `{}` schema for validation: {}",
                    tool_name, err
                );
                warn!(target: "agent_deck::tools", "{}", message);
                CompiledSchema::Broken(message)
            }
        };
        self.schemas.insert(tool_name.to_string(), compiled);
    }

    /// Check `params` against the schema registered for `tool_name`.
    /// Tools without a registered schema pass.
    pub fn check(&self, tool_name: &str, params: &Value) -> Result<()> {
        match self.schemas.get(tool_name) {
            None => Ok(()),
            Some(CompiledSchema::Broken(message)) => Err(DemoError::Validation(message.clone())),
            Some(CompiledSchema::Ready(compiled)) => check_against(tool_name, compiled, params),
        }
    }
}

fn check_against(tool_name: &str, compiled: &JSONSchema, params: &Value) -> Result<()> {
    if let Err(errors) = compiled.validate(params) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = details.join("; ");
        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(DemoError::Validation(format!(
            "Parameters for `{}` do not match schema: {}",
            tool_name, detail_str
        )));
    }

    Ok(())
}
