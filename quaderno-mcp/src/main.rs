//! Quaderno MCP Server
//!
//! MCP Server implementing spec 2025-11-25
//!
//! Tools:
//! - compute: Run a matrix operation against session matrices
//! - add_matrix: Add or replace a named matrix
//! - remove_matrix: Remove a matrix
//! - list_matrices: List session matrices
//! - store_result: Keep a computed matrix as a new operand
//! - history: List past operations with their derivation steps
//! - clear_history: Drop the operation history
//! - list_operations: List available operations
//! - describe: Get documentation for one operation
//!
//! Resources:
//! - quaderno://matrices - List session matrices
//! - quaderno://matrices/{name} - Get a specific matrix

use quaderno::{find_similar, HistoryEntry, Quaderno, Session};
use quaderno_core::{QuadernoError, RawCell};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "quaderno";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

fn invalid_params(message: impl Into<String>) -> McpError {
    McpError {
        code: -32602,
        message: message.into(),
        data: None,
    }
}

fn main() {
    // Logs go to stderr; stdout carries only protocol frames
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let engine = Quaderno::new();
    let mut session = Session::with_starter_grids();

    info!("Quaderno MCP Server v{} started", SERVER_VERSION);
    info!("Protocol: {}", PROTOCOL_VERSION);
    for grid in session.grids() {
        info!("Starter matrix: {} ({}x{})", grid.name, grid.rows, grid.cols);
    }

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    info!("Server ready, waiting for requests...");

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                // EOF - client disconnected
                info!("Client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                debug!("Received: {} bytes", line.len());

                let request: McpRequest = match serde_json::from_str(line) {
                    Ok(r) => r,
                    Err(e) => {
                        warn!("Error parsing request: {}", e);
                        let response = McpResponse {
                            jsonrpc: "2.0".to_string(),
                            id: None,
                            result: None,
                            error: Some(McpError {
                                code: -32700,
                                message: format!("Parse error: {}", e),
                                data: None,
                            }),
                        };
                        let mut stdout = io::stdout().lock();
                        let _ = writeln!(stdout, "{}", serde_json::to_string(&response).unwrap());
                        let _ = stdout.flush();
                        continue;
                    }
                };

                debug!("Processing: {}", request.method);

                let response = handle_request(&engine, &mut session, &request);

                // Notifications (no id) should NOT receive a response
                if request.id.is_none() {
                    debug!("Notification processed (no response): {}", request.method);
                    continue;
                }

                let response_json = serde_json::to_string(&response).unwrap();
                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", response_json) {
                    error!("Error writing response: {}", e);
                    break;
                }
                if let Err(e) = stdout.flush() {
                    error!("Error flushing stdout: {}", e);
                    break;
                }
                drop(stdout);

                debug!("Sent response for: {}", request.method);
            }
            Err(e) => {
                error!("Error reading input: {}", e);
                break;
            }
        }
    }

    info!("Server shutting down");
}

fn handle_request(engine: &Quaderno, session: &mut Session, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(engine, session, &request.params),

        // Resources
        "resources/list" => handle_resources_list(session),
        "resources/read" => handle_resources_read(session, &request.params),

        _ => Err(McpError {
            code: -32601,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params
        .as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!("Client connected: {} (protocol: {})", client_info, client_protocol);

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Matrix operations with step-by-step derivations"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            },
            "resources": {
                "subscribe": false,
                "listChanged": false
            }
        },
        "instructions": "Quaderno keeps a working set of named matrices. Use compute to run operations against them by name, history to review past results with their derivation steps, and store_result to keep a computed matrix as a new operand. Cells hold raw text; anything that does not read as a number counts as 0."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "compute",
                "description": "Run a matrix operation against session matrices. Returns the result plus a step-by-step derivation and records it in history.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "operation": {
                            "type": "string",
                            "description": "Operation name or alias: add, subtract (sub), multiply (mul), transpose, inverse, determinant (det), rank, trace"
                        },
                        "a": {
                            "type": "string",
                            "description": "Name of the first matrix"
                        },
                        "b": {
                            "type": "string",
                            "description": "Name of the second matrix (binary operations only)"
                        }
                    },
                    "required": ["operation", "a"]
                }
            },
            {
                "name": "add_matrix",
                "description": "Add a named matrix to the session, replacing any matrix with the same name. Cells may be strings or numbers; blank or non-numeric cells count as 0.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Matrix name"
                        },
                        "cells": {
                            "type": "array",
                            "items": { "type": "array" },
                            "description": "Rows of cells, all rows the same length"
                        }
                    },
                    "required": ["name", "cells"]
                }
            },
            {
                "name": "remove_matrix",
                "description": "Remove a matrix from the session.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Matrix name"
                        }
                    },
                    "required": ["name"]
                }
            },
            {
                "name": "list_matrices",
                "description": "List the matrices in the session with their shapes.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "store_result",
                "description": "Store a computed matrix from history as a new session matrix. Without entry_id the most recent result is stored. Scalar results cannot be stored.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "entry_id": {
                            "type": "integer",
                            "description": "History entry id. Omit for the most recent entry."
                        }
                    }
                }
            },
            {
                "name": "history",
                "description": "List past operations, most recent first, with results and derivation steps.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of entries to return"
                        }
                    }
                }
            },
            {
                "name": "clear_history",
                "description": "Drop all history entries.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_operations",
                "description": "List available operations with usage and examples.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "describe",
                "description": "Get documentation for one operation by name or alias.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Operation name or alias"
                        }
                    },
                    "required": ["name"]
                }
            }
        ]
    }))
}

fn handle_resources_list(session: &Session) -> Result<JsonValue, McpError> {
    let resources: Vec<JsonValue> = session
        .grids()
        .iter()
        .map(|g| {
            json!({
                "uri": format!("quaderno://matrices/{}", g.name),
                "name": g.name,
                "description": format!("{}x{} matrix", g.rows, g.cols),
                "mimeType": "application/json"
            })
        })
        .collect();

    Ok(json!({ "resources": resources }))
}

fn handle_resources_read(session: &Session, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let uri = params
        .as_ref()
        .and_then(|p| p.get("uri"))
        .and_then(|u| u.as_str())
        .ok_or_else(|| invalid_params("Missing uri parameter"))?;

    let name = uri.strip_prefix("quaderno://matrices/").ok_or_else(|| {
        invalid_params(format!(
            "Invalid URI: {}. Expected quaderno://matrices/{{name}}",
            uri
        ))
    })?;

    let grid = session
        .grid(name)
        .ok_or_else(|| invalid_params(QuadernoError::unknown_matrix(name).to_string()))?;

    Ok(json!({
        "contents": [{
            "uri": uri,
            "mimeType": "application/json",
            "text": serde_json::to_string_pretty(grid).unwrap()
        }]
    }))
}

fn handle_tool_call(
    engine: &Quaderno,
    session: &mut Session,
    params: &Option<JsonValue>,
) -> Result<JsonValue, McpError> {
    let params = params
        .as_ref()
        .ok_or_else(|| invalid_params("Missing params"))?;

    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "compute" => tool_compute(engine, session, args),
        "add_matrix" => tool_add_matrix(session, args),
        "remove_matrix" => tool_remove_matrix(session, args),
        "list_matrices" => tool_list_matrices(session),
        "store_result" => tool_store_result(session, args),
        "history" => tool_history(session, args),
        "clear_history" => tool_clear_history(session),
        "list_operations" => tool_list_operations(engine),
        "describe" => tool_describe(engine, args),
        _ => Err(invalid_params(format!("Unknown tool: {}", name))),
    }
}

/// Domain errors come back inside the tool result, not as protocol
/// errors
fn domain_error(err: QuadernoError) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": err.to_string() }],
        "error": err,
        "isError": true
    })
}

fn render_entry(entry: &HistoryEntry) -> String {
    let mut out = format!("{} = {}", entry.description, entry.summary);
    if let Some(m) = entry.output.as_matrix() {
        out.push_str(&format!("\n{}", m));
    }
    if !entry.steps.is_empty() {
        out.push_str("\n\nSteps:");
        for step in &entry.steps {
            out.push_str(&format!("\n  {}", step));
        }
    }
    out
}

fn tool_compute(
    engine: &Quaderno,
    session: &mut Session,
    args: JsonValue,
) -> Result<JsonValue, McpError> {
    let operation = args
        .get("operation")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid_params("Missing operation argument"))?;

    let a = args
        .get("a")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid_params("Missing a argument"))?;

    let b = args.get("b").and_then(|v| v.as_str());

    match session.apply_named(engine, operation, a, b) {
        Ok(entry) => Ok(json!({
            "content": [{ "type": "text", "text": render_entry(&entry) }],
            "entry": entry,
            "isError": false
        })),
        Err(e) => Ok(domain_error(e)),
    }
}

fn json_cell(value: &JsonValue) -> RawCell {
    match value {
        JsonValue::String(s) => RawCell::new(s.as_str()),
        JsonValue::Number(n) => RawCell::new(n.to_string()),
        JsonValue::Null => RawCell::new(""),
        other => RawCell::new(other.to_string()),
    }
}

fn parse_cells(value: &JsonValue) -> Result<Vec<Vec<RawCell>>, McpError> {
    let rows = value
        .as_array()
        .ok_or_else(|| invalid_params("cells must be an array of rows"))?;

    let mut data = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row
            .as_array()
            .ok_or_else(|| invalid_params("each row must be an array of cells"))?;
        data.push(cells.iter().map(json_cell).collect());
    }
    Ok(data)
}

fn tool_add_matrix(session: &mut Session, args: JsonValue) -> Result<JsonValue, McpError> {
    let name = args
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid_params("Missing name argument"))?;

    let cells = args
        .get("cells")
        .ok_or_else(|| invalid_params("Missing cells argument"))?;
    let data = parse_cells(cells)?;

    match session.add_grid(name, data) {
        Ok(grid) => Ok(json!({
            "content": [{
                "type": "text",
                "text": format!("Added {} ({}x{})", grid.name, grid.rows, grid.cols)
            }],
            "matrix": grid,
            "isError": false
        })),
        Err(e) => Ok(domain_error(e)),
    }
}

fn tool_remove_matrix(session: &mut Session, args: JsonValue) -> Result<JsonValue, McpError> {
    let name = args
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid_params("Missing name argument"))?;

    match session.remove_grid(name) {
        Ok(grid) => Ok(json!({
            "content": [{ "type": "text", "text": format!("Removed {}", grid.name) }],
            "isError": false
        })),
        Err(e) => Ok(domain_error(e)),
    }
}

fn tool_list_matrices(session: &Session) -> Result<JsonValue, McpError> {
    let lines: Vec<String> = session
        .grids()
        .iter()
        .map(|g| format!("{} ({}x{})", g.name, g.rows, g.cols))
        .collect();

    let text = if lines.is_empty() {
        "No matrices in session".to_string()
    } else {
        lines.join("\n")
    };

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "matrices": session.grids(),
        "isError": false
    }))
}

fn tool_store_result(session: &mut Session, args: JsonValue) -> Result<JsonValue, McpError> {
    let entry_id = args.get("entry_id").and_then(|v| v.as_u64());

    match session.store_result(entry_id) {
        Ok(grid) => Ok(json!({
            "content": [{
                "type": "text",
                "text": format!("Stored result as '{}' ({}x{})", grid.name, grid.rows, grid.cols)
            }],
            "matrix": grid,
            "isError": false
        })),
        Err(e) => Ok(domain_error(e)),
    }
}

fn tool_history(session: &Session, args: JsonValue) -> Result<JsonValue, McpError> {
    let limit = args
        .get("limit")
        .and_then(|v| v.as_u64())
        .map(|n| n as usize)
        .unwrap_or(usize::MAX);

    let entries: Vec<&HistoryEntry> = session.history().iter().take(limit).collect();
    let lines: Vec<String> = entries
        .iter()
        .map(|e| format!("{}: {} = {}", e.id, e.description, e.summary))
        .collect();

    let text = if lines.is_empty() {
        "History is empty".to_string()
    } else {
        lines.join("\n")
    };

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "entries": entries,
        "isError": false
    }))
}

fn tool_clear_history(session: &mut Session) -> Result<JsonValue, McpError> {
    session.clear_history();
    Ok(json!({
        "content": [{ "type": "text", "text": "History cleared" }],
        "isError": false
    }))
}

fn tool_list_operations(engine: &Quaderno) -> Result<JsonValue, McpError> {
    let operations = engine.operations();
    let lines: Vec<String> = operations
        .iter()
        .map(|m| format!("{} - {} (usage: {})", m.name, m.description, m.usage))
        .collect();

    Ok(json!({
        "content": [{ "type": "text", "text": lines.join("\n") }],
        "operations": operations,
        "isError": false
    }))
}

fn tool_describe(engine: &Quaderno, args: JsonValue) -> Result<JsonValue, McpError> {
    let name = args
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid_params("Missing name argument"))?;

    match engine.describe_operation(name) {
        Some(meta) => {
            let text = format!(
                "# {}\n\n{}\n\nUsage: {}\nExample: {}",
                meta.name, meta.description, meta.usage, meta.example
            );
            Ok(json!({
                "content": [{ "type": "text", "text": text }],
                "operation": meta,
                "isError": false
            }))
        }
        None => {
            let similar = find_similar(name);
            let mut err = QuadernoError::unknown_operation(name);
            if !similar.is_empty() {
                err = err.with_suggestion(format!("Similar: {}", similar.join(", ")));
            }
            Ok(domain_error(err))
        }
    }
}
