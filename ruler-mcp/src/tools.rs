//! Tools exposed to clients
//!
//! Each tool validates its own arguments, calls the converter and renders a
//! text block plus structured data. Domain errors become tool results with
//! `isError: true`; malformed arguments are protocol errors.

use ruler_core::RulerError;
use ruler_units::UnitRegistry;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use crate::protocol::McpError;
use crate::render;

/// Metadata advertised by `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
}

pub trait Tool: Send + Sync {
    fn meta(&self) -> ToolMeta;
    fn call(&self, args: JsonValue, units: &UnitRegistry) -> Result<JsonValue, McpError>;
}

/// Ordered set of tools, looked up by name
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn with_tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.meta().name == name)
            .map(|t| t.as_ref())
    }

    pub fn list(&self) -> Vec<ToolMeta> {
        self.tools.iter().map(|t| t.meta()).collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.meta().name).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry with every conversion tool
pub fn standard_tools() -> ToolRegistry {
    ToolRegistry::new()
        .with_tool(ListUnits)
        .with_tool(Convert)
        .with_tool(ConvertToAll)
}

fn parse_args<T: DeserializeOwned>(tool: &str, args: JsonValue) -> Result<T, McpError> {
    serde_json::from_value(args)
        .map_err(|e| McpError::invalid_params(format!("Invalid arguments for {}: {}", tool, e)))
}

/// Reject what the input form would not let through
fn check_value(value: f64) -> Result<f64, RulerError> {
    if !value.is_finite() {
        return Err(RulerError::invalid_value(format!("{} is not a finite number", value)));
    }
    if value < 0.0 {
        return Err(RulerError::invalid_value(format!("{} is negative", value)));
    }
    // -0.0 passes the sign check
    Ok(value.abs())
}

/// Reject a converted value that left the range of f64
fn check_result(value: f64, unit: &str) -> Result<f64, RulerError> {
    if !value.is_finite() {
        return Err(RulerError::invalid_value(format!(
            "converted value overflows in {}",
            unit
        )));
    }
    Ok(value)
}

fn text_result(text: String, data: JsonValue) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": text }],
        "data": data,
        "isError": false
    })
}

fn error_result(err: RulerError) -> JsonValue {
    debug!(code = err.code(), "tool call failed: {}", err);
    let payload = err.to_payload();
    json!({
        "content": [{ "type": "text", "text": payload.message }],
        "error": payload,
        "isError": true
    })
}

fn unit_schema(description: &str, units: &[&str]) -> JsonValue {
    json!({
        "type": "string",
        "description": description,
        "examples": units
    })
}

// ============ list_units ============

pub struct ListUnits;

impl Tool for ListUnits {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "list_units",
            description: "List the supported length units in display order.",
            input_schema: json!({ "type": "object", "properties": {} }),
        }
    }

    fn call(&self, _args: JsonValue, units: &UnitRegistry) -> Result<JsonValue, McpError> {
        let text = units
            .iter()
            .map(|u| format!("- {} [{}]", u.label, u.symbol))
            .collect::<Vec<_>>()
            .join("\n");
        let data = units.iter().collect::<Vec<_>>();
        Ok(text_result(text, json!({ "units": data })))
    }
}

// ============ convert ============

pub struct Convert;

#[derive(Debug, Deserialize)]
struct ConvertArgs {
    value: f64,
    from_unit: String,
    to_unit: String,
}

impl Convert {
    fn run(&self, args: &ConvertArgs, units: &UnitRegistry) -> Result<JsonValue, RulerError> {
        let value = check_value(args.value)?;
        let from = units.resolve(&args.from_unit)?;
        let to = units.resolve(&args.to_unit)?;

        if from.label == to.label {
            return Ok(text_result(
                render::SAME_UNIT_MESSAGE.to_string(),
                json!({
                    "value": value,
                    "from_unit": from.label,
                    "to_unit": to.label,
                    "converted": false
                }),
            ));
        }

        let result = units.convert(value, &from.label, &to.label)?;
        let result = check_result(result, &to.label)?;
        Ok(text_result(
            render::single_line(value, &from.label, result, &to.label),
            json!({
                "value": value,
                "from_unit": from.label,
                "to_unit": to.label,
                "converted": true,
                "result": result
            }),
        ))
    }
}

impl Tool for Convert {
    fn meta(&self) -> ToolMeta {
        let examples = ["Meter (m)", "ft", "inches"];
        ToolMeta {
            name: "convert",
            description: "Convert a length from one unit to another.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "value": {
                        "type": "number",
                        "minimum": 0,
                        "description": "Length to convert"
                    },
                    "from_unit": unit_schema("Source unit label, symbol or name", &examples),
                    "to_unit": unit_schema("Target unit label, symbol or name", &examples)
                },
                "required": ["value", "from_unit", "to_unit"]
            }),
        }
    }

    fn call(&self, args: JsonValue, units: &UnitRegistry) -> Result<JsonValue, McpError> {
        let args: ConvertArgs = parse_args("convert", args)?;
        Ok(self.run(&args, units).unwrap_or_else(error_result))
    }
}

// ============ convert_to_all ============

pub struct ConvertToAll;

#[derive(Debug, Deserialize)]
struct ConvertToAllArgs {
    value: f64,
    from_unit: String,
}

impl ConvertToAll {
    fn run(&self, args: &ConvertToAllArgs, units: &UnitRegistry) -> Result<JsonValue, RulerError> {
        let value = check_value(args.value)?;
        let from = units.resolve(&args.from_unit)?;
        let results = units.convert_to_all(value, &from.label)?;
        for r in &results {
            check_result(r.value, &r.unit)?;
        }

        Ok(text_result(
            render::results_table(value, &from.label, &results),
            json!({
                "value": value,
                "from_unit": from.label,
                "results": results
            }),
        ))
    }
}

impl Tool for ConvertToAll {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "convert_to_all",
            description: "Convert a length into every other supported unit.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "value": {
                        "type": "number",
                        "minimum": 0,
                        "description": "Length to convert"
                    },
                    "from_unit": unit_schema(
                        "Source unit label, symbol or name",
                        &["Meter (m)", "km"]
                    )
                },
                "required": ["value", "from_unit"]
            }),
        }
    }

    fn call(&self, args: JsonValue, units: &UnitRegistry) -> Result<JsonValue, McpError> {
        let args: ConvertToAllArgs = parse_args("convert_to_all", args)?;
        Ok(self.run(&args, units).unwrap_or_else(error_result))
    }
}
