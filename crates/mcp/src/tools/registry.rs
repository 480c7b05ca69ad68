// MCP tool trait, registry and schema helpers

use crate::error::ToolError;
use crate::protocol::ToolSchema;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::num::IntErrorKind;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments, returning the raw result value
    async fn execute(&self, arguments: Value) -> Result<Value, ToolError>;
}

/// Tool registry for managing available tools
///
/// Read-only once the server starts. Listing preserves registration order.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool. Names must be unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.schema().name;
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| t.schema())
            .collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Resolve `name` and run it. Unknown names fail before anything runs.
    pub async fn call(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tool.execute(arguments).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserialize tool arguments into their typed form.
///
/// A missing argument object is treated as `{}` so tools whose fields are
/// all optional can be called bare.
pub fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Deserialize an optional page size leniently.
///
/// Accepts integers, integral floats (`50.0`) and numeric strings (`"50"`).
/// Values past `u32::MAX` saturate; callers clamp afterwards. Negative,
/// fractional and non-numeric values are rejected. `null` means unset.
pub fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let invalid = |v: &Value| -> D::Error {
        de::Error::custom(format!("invalid limit {v}, expected a non-negative integer"))
    };

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                Ok(Some(saturate(u)))
            } else if let Some(f) = n
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
            {
                // `as` saturates for out-of-range floats
                Ok(Some(saturate(f as u64)))
            } else {
                Err(invalid(&Value::Number(n)))
            }
        }
        Some(Value::String(s)) => match s.trim().parse::<u64>() {
            Ok(u) => Ok(Some(saturate(u))),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(Some(u32::MAX)),
            Err(_) => Err(invalid(&Value::String(s))),
        },
        Some(other) => Err(invalid(&other)),
    }
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

pub fn json_schema_string(description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_integer(description: &str, default: u32, maximum: Option<u32>) -> Value {
    let mut schema = serde_json::json!({
        "type": "integer",
        "description": description,
        "default": default,
        "minimum": 0
    });
    if let Some(maximum) = maximum {
        schema["maximum"] = maximum.into();
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool(&'static str);

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.0.to_string(),
                description: "Echo arguments".to_string(),
                input_schema: json_schema_object(json!({}), vec![]),
            }
        }

        async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
            Ok(arguments)
        }
    }

    #[test]
    fn test_register_and_list_in_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool("b_tool"))).unwrap();
        registry.register(Arc::new(EchoTool("a_tool"))).unwrap();

        let names: Vec<String> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["b_tool", "a_tool"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a_tool"));
        assert!(!registry.contains("c_tool"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool("echo"))).unwrap();

        let err = registry.register(Arc::new(EchoTool("echo"))).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(name) if name == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = ToolRegistry::new();

        let err = registry.call("nope", json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_call_known_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool("echo"))).unwrap();

        let out = registry.call("echo", json!({"x": 1})).await.unwrap();
        assert_eq!(out, json!({"x": 1}));
    }

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Args {
        name: String,
        #[serde(default)]
        count: Option<u32>,
    }

    #[test]
    fn test_parse_arguments_reads_fields() {
        let args = parse_arguments::<Args>(json!({"name": "x", "count": 3})).unwrap();
        assert_eq!(args.name, "x");
        assert_eq!(args.count, Some(3));
    }

    #[test]
    fn test_parse_arguments_errors_name_the_field() {
        let err = parse_arguments::<Args>(json!({})).unwrap_err();
        assert!(err.to_string().contains("missing field `name`"));

        let err = parse_arguments::<Args>(json!({"name": "x", "count": "ten"})).unwrap_err();
        assert!(err.to_string().starts_with("Invalid arguments: invalid type"));

        let err = parse_arguments::<Args>(json!({"name": "x", "colour": "red"})).unwrap_err();
        assert!(err.to_string().contains("unknown field `colour`"));
    }

    #[derive(Debug, Deserialize)]
    struct Page {
        #[serde(default, deserialize_with = "deserialize_limit")]
        limit: Option<u32>,
    }

    fn page_limit(arguments: Value) -> Result<Option<u32>, ToolError> {
        parse_arguments::<Page>(arguments).map(|p| p.limit)
    }

    #[test]
    fn test_limit_coerces_numeric_forms() {
        assert_eq!(page_limit(json!({})).unwrap(), None);
        assert_eq!(page_limit(json!({"limit": null})).unwrap(), None);
        assert_eq!(page_limit(json!({"limit": 50})).unwrap(), Some(50));
        assert_eq!(page_limit(json!({"limit": 50.0})).unwrap(), Some(50));
        assert_eq!(page_limit(json!({"limit": "50"})).unwrap(), Some(50));
        assert_eq!(page_limit(json!({"limit": " 7 "})).unwrap(), Some(7));
    }

    #[test]
    fn test_limit_saturates_oversized_values() {
        assert_eq!(page_limit(json!({"limit": 10_000_000_000u64})).unwrap(), Some(u32::MAX));
        assert_eq!(page_limit(json!({"limit": 1e30})).unwrap(), Some(u32::MAX));
        assert_eq!(
            page_limit(json!({"limit": "99999999999999999999999"})).unwrap(),
            Some(u32::MAX)
        );
    }

    #[test]
    fn test_limit_rejects_non_integers() {
        for bad in [json!(-5), json!(2.5), json!("-1"), json!("ten"), json!(true), json!([1])] {
            let err = page_limit(json!({ "limit": bad })).unwrap_err();
            assert!(
                matches!(&err, ToolError::InvalidArguments(msg) if msg.contains("invalid limit")),
                "{err}"
            );
        }
    }

    #[test]
    fn test_parse_arguments_null_is_empty_object() {
        #[derive(Debug, Deserialize)]
        struct Optional {
            #[serde(default)]
            cursor: Option<String>,
        }

        let args = parse_arguments::<Optional>(Value::Null).unwrap();
        assert!(args.cursor.is_none());
    }

    #[test]
    fn test_integer_schema_bounds() {
        let schema = json_schema_integer("Page size", 100, Some(200));
        assert_eq!(schema["default"], 100);
        assert_eq!(schema["maximum"], 200);

        let schema = json_schema_integer("Messages", 10, None);
        assert!(schema.get("maximum").is_none());
    }
}
