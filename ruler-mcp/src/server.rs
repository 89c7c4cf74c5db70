//! Request dispatch and the stdio loop

use std::io::{self, BufRead, Write};

use ruler_units::UnitRegistry;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};

use crate::protocol::{McpError, McpRequest, McpResponse};
use crate::tools::{standard_tools, ToolRegistry};
use crate::{PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};

pub struct Server<'a> {
    tools: ToolRegistry,
    units: &'a UnitRegistry,
}

impl<'a> Server<'a> {
    pub fn new(units: &'a UnitRegistry) -> Self {
        Server {
            tools: standard_tools(),
            units,
        }
    }

    /// Serve line-delimited requests until EOF
    ///
    /// Lines are read as bytes so a line that is not UTF-8 gets a parse
    /// error reply instead of ending the loop. Only I/O errors stop it.
    pub fn run<R: BufRead, W: Write>(&self, reader: R, writer: &mut W) -> io::Result<()> {
        for chunk in reader.split(b'\n') {
            let reply = match String::from_utf8(chunk?) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    debug!(bytes = line.len(), "received request");
                    self.handle_line(line)
                }
                Err(e) => {
                    warn!("request is not valid UTF-8: {}", e);
                    parse_failure(e)
                }
            };

            match reply {
                Ok(Some(response)) => {
                    writeln!(writer, "{}", response)?;
                    writer.flush()?;
                }
                Ok(None) => {}
                Err(e) => warn!("failed to serialize response: {}", e),
            }
        }

        info!("client disconnected (EOF)");
        Ok(())
    }

    /// Handle one raw line; `None` means no reply is due
    pub fn handle_line(&self, line: &str) -> serde_json::Result<Option<String>> {
        let request: McpRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!("error parsing request: {}", e);
                return parse_failure(e);
            }
        };

        debug!(method = %request.method, "processing");
        let response = self.handle_request(&request);

        // Notifications (no id) get no response
        if request.id.is_none() {
            debug!(method = %request.method, "notification processed");
            return Ok(None);
        }

        serde_json::to_string(&response).map(Some)
    }

    pub fn handle_request(&self, request: &McpRequest) -> McpResponse {
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tool_call(&request.params),
            _ => Err(McpError::method_not_found(&request.method)),
        };

        match result {
            Ok(r) => McpResponse::success(request.id.clone(), r),
            Err(e) => McpResponse::failure(request.id.clone(), e),
        }
    }

    fn handle_initialize(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let client_info = params
            .as_ref()
            .and_then(|p| p.get("clientInfo"))
            .and_then(|c| c.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("unknown");

        // Echo the client's protocol version
        let client_protocol = params
            .as_ref()
            .and_then(|p| p.get("protocolVersion"))
            .and_then(|v| v.as_str())
            .unwrap_or(PROTOCOL_VERSION);

        info!(client = client_info, protocol = client_protocol, "client connected");

        Ok(json!({
            "protocolVersion": client_protocol,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION,
                "description": "Length conversion between meters, centimeters, kilometers, inches and feet"
            },
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "instructions": "Use 'list_units' to see the supported units, 'convert' for a single conversion and 'convert_to_all' to see a value in every other unit. Values must be 0 or greater."
        }))
    }

    fn handle_tools_list(&self) -> Result<JsonValue, McpError> {
        Ok(json!({ "tools": self.tools.list() }))
    }

    fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params
            .as_ref()
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));

        let tool = self.tools.get(name).ok_or_else(|| {
            McpError::invalid_params(format!("Unknown tool: {}", name))
                .with_data(json!({ "available": self.tools.names() }))
        })?;

        debug!(tool = name, "calling tool");
        tool.call(args, self.units)
    }
}

/// Reply to a line that could not be read as a request; it has no id
fn parse_failure(details: impl std::fmt::Display) -> serde_json::Result<Option<String>> {
    let response = McpResponse::failure(None, McpError::parse_error(details));
    serde_json::to_string(&response).map(Some)
}
