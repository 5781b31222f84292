//! Tool System
//!
//! Named operations invoked with keyword arguments. Every tool answers with a
//! [`ToolResult`] carrying a [`ToolStatus`], so callers can branch on lookup
//! misses and empty results without treating them as failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AgentError, Result};

/// Tool call request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool identifier
    pub name: String,

    /// Arguments as key-value pairs
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,

    /// Optional call ID for tracking
    #[serde(default)]
    pub id: Option<String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: HashMap::new(),
            id: None,
        }
    }

    /// Add an argument (builder style)
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Raw argument value; JSON `null` counts as absent
    pub fn value(&self, key: &str) -> Option<&serde_json::Value> {
        self.arguments.get(key).filter(|v| !v.is_null())
    }

    /// String argument, trimmed; empty strings count as absent
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.value(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Boolean argument; accepts JSON booleans and "true"/"false" strings
    pub fn bool_arg(&self, key: &str) -> Option<bool> {
        match self.value(key)? {
            serde_json::Value::Bool(b) => Some(*b),
            serde_json::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Outcome category of a tool execution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    /// Completed with a result
    Success,
    /// Lookup miss on a required input, or invalid input
    Error,
    /// Zero results, not a failure
    NotFound,
    /// Route search found nothing for the lane
    NoRoutesFound,
    /// Only partial reference information exists
    Limited,
    /// No option could be priced
    NoOptions,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Success => "success",
            ToolStatus::Error => "error",
            ToolStatus::NotFound => "not_found",
            ToolStatus::NoRoutesFound => "no_routes_found",
            ToolStatus::Limited => "limited",
            ToolStatus::NoOptions => "no_options",
        }
    }
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result from tool execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was called
    pub name: String,

    /// Call ID (if provided in request)
    pub id: Option<String>,

    /// Outcome category
    pub status: ToolStatus,

    /// Human-readable summary or error message
    pub output: String,

    /// Structured result map
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self::with_status(name, ToolStatus::Success, output)
    }

    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self::with_status(name, ToolStatus::Error, error)
    }

    pub fn with_status(
        name: impl Into<String>,
        status: ToolStatus,
        output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: None,
            status,
            output: output.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, number, boolean, object, array)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// Default value if not provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    /// Enum of allowed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

impl ParameterSchema {
    pub fn required(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: true,
            default: None,
            enum_values: None,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(name, param_type, description)
        }
    }

    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_enum<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<serde_json::Value>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Tool definition schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,

    /// Category for grouping
    #[serde(default)]
    pub category: Option<String>,

    /// Whether tool has side effects
    #[serde(default)]
    pub has_side_effects: bool,
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult>;

    /// Validate arguments before execution (optional)
    fn validate(&self, call: &ToolCall) -> Result<()> {
        let schema = self.schema();

        for param in &schema.parameters {
            if param.required && call.value(&param.name).is_none() {
                return Err(AgentError::ToolValidation(format!(
                    "Missing required parameter: {}",
                    param.name
                )));
            }
        }

        Ok(())
    }
}

/// Registry for available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a new tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let schema = tool.schema();
        self.tools.insert(schema.name.clone(), Arc::new(tool));
    }

    /// Register a shared tool
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        self.tools.insert(schema.name.clone(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Execute a tool call
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| AgentError::ToolNotFound(call.name.clone()))?;

        tool.validate(call)?;

        let call_id = call
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let result = tool.execute(call).await?;
        tracing::debug!(tool = %call.name, id = %call_id, status = %result.status, "Tool executed");

        Ok(result.with_id(call_id))
    }

    /// All tool schemas, sorted by name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<_> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Schemas for the named tools, in the given order; unknown names are skipped
    pub fn schemas_for(&self, names: &[&str]) -> Vec<ToolSchema> {
        names
            .iter()
            .filter_map(|name| self.tools.get(*name))
            .map(|t| t.schema())
            .collect()
    }

    /// Schemas sharing a category
    pub fn schemas_in_category(&self, category: &str) -> Vec<ToolSchema> {
        self.schemas()
            .into_iter()
            .filter(|s| s.category.as_deref() == Some(category))
            .collect()
    }

    /// Get tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Render a tool listing for instruction text
    pub fn generate_prompt_section(&self, schemas: &[ToolSchema]) -> String {
        let mut prompt = String::from("## Available Tools\n\n");

        for schema in schemas {
            prompt.push_str(&format!("### {}\n", schema.name));
            prompt.push_str(&format!("{}\n", schema.description));

            if !schema.parameters.is_empty() {
                prompt.push_str("**Parameters:**\n");
                for param in &schema.parameters {
                    let required = if param.required { " (required)" } else { "" };
                    prompt.push_str(&format!(
                        "- `{}` ({}){}: {}\n",
                        param.name, param.param_type, required, param.description
                    ));
                }
            }
            prompt.push('\n');
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".into(),
                description: "Echo the text argument".into(),
                parameters: vec![ParameterSchema::required("text", "string", "Text to echo")],
                category: Some("test".into()),
                has_side_effects: false,
            }
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
            match call.str_arg("text") {
                Some(text) => Ok(ToolResult::success("echo", text)),
                None => Ok(ToolResult::with_status("echo", ToolStatus::NotFound, "nothing to echo")),
            }
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ToolStatus::NoRoutesFound).unwrap();
        assert_eq!(json, "\"no_routes_found\"");
        assert_eq!(ToolStatus::NoOptions.as_str(), "no_options");
    }

    #[test]
    fn test_argument_accessors() {
        let call = ToolCall::new("echo")
            .arg("text", "  hello ")
            .arg("blank", "   ")
            .arg("flag", "Yes")
            .arg("none", serde_json::Value::Null);

        assert_eq!(call.str_arg("text"), Some("hello"));
        assert_eq!(call.str_arg("blank"), None);
        assert_eq!(call.bool_arg("flag"), Some(true));
        assert!(call.value("none").is_none());
    }

    #[tokio::test]
    async fn test_registry_validates_and_assigns_id() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        assert_eq!(registry.len(), 1);
        assert!(registry.get("unknown").is_none());

        let missing = registry.execute(&ToolCall::new("echo")).await;
        assert!(matches!(missing, Err(AgentError::ToolValidation(_))));

        let unknown = registry.execute(&ToolCall::new("nope")).await;
        assert!(matches!(unknown, Err(AgentError::ToolNotFound(_))));

        let result = registry
            .execute(&ToolCall::new("echo").arg("text", "hi"))
            .await
            .unwrap();
        assert!(result.is_success());
        assert_eq!(result.output, "hi");
        assert!(result.id.is_some());
    }

    #[test]
    fn test_prompt_section_lists_parameters() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let section = registry.generate_prompt_section(&registry.schemas_for(&["echo", "missing"]));
        assert!(section.contains("### echo"));
        assert!(section.contains("`text` (string) (required)"));
        assert_eq!(registry.schemas_in_category("test").len(), 1);
    }
}
