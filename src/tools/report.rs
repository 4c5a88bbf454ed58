use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a mock tool hands back to the agent: a one-line summary, an optional
/// markdown body, or an error message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl ToolReport {
    pub fn success(summary: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            data: Some(data.into()),
            ..Self::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_sources(mut self, sources: &[&str]) -> Self {
        self.sources = sources.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Text kept in histories: the summary, else the error, else a placeholder
    pub fn headline(&self) -> &str {
        self.summary
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or("No result")
    }

    pub fn into_value(self) -> Result<Value, crate::DemoError> {
        serde_json::to_value(self).map_err(|e| {
            crate::DemoError::ToolExecution(format!("Failed to serialize result: {}", e))
        })
    }

    /// Read a tool's JSON output back into a report. Outputs that are not
    /// report-shaped are rendered as data.
    pub fn from_value(value: &Value) -> Self {
        match serde_json::from_value::<ToolReport>(value.clone()) {
            Ok(report) if report != ToolReport::default() => report,
            _ => ToolReport {
                data: Some(match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                }),
                ..Self::default()
            },
        }
    }
}
