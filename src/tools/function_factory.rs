use super::{tool::ToolRegistry, Tool};
use crate::schemas::validator::StrictValidator;
use crate::{DemoError, Result};
use serde_json::Value;

/// Factory for creating and managing tool execution
#[derive(Debug, Default)]
pub struct FunctionFactory {
    registry: ToolRegistry,
    validator: StrictValidator,
}

impl FunctionFactory {
    /// Create a new function factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool with the factory; its parameter schema is enforced on
    /// every call
    pub fn register_tool<T: Tool + 'static>(&mut self, tool: T) {
        self.validator
            .register_schema(tool.name(), tool.parameters_schema());
        self.registry.register(tool);
    }

    /// Execute a function call by name
    pub async fn execute_function(&self, function_name: &str, parameters: Value) -> Result<Value> {
        let tool = self
            .registry
            .get(function_name)
            .ok_or_else(|| DemoError::ToolNotFound(function_name.to_string()))?;

        self.validator.check(function_name, &parameters)?;
        tool.execute(parameters).await
    }

    /// Function-calling style definitions for every registered tool
    pub fn get_tool_definitions(&self) -> Vec<Value> {
        self.registry.to_definitions()
    }

    /// Check if a function exists
    pub fn has_function(&self, name: &str) -> bool {
        self.registry.get(name).is_some()
    }

    /// Display label for a tool, falling back to its name
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.registry
            .get(name)
            .map(|tool| tool.display_name())
            .unwrap_or(name)
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.registry.list().into_iter().map(|t| t.name()).collect()
    }
}
