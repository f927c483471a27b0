//! MCP tool caller over streamable HTTP
//!
//! Speaks JSON-RPC 2.0 to a single MCP server endpoint: `initialize` once,
//! then `tools/call` per request. Responses may be plain JSON or an SSE
//! stream; in the latter case the last JSON `data:` frame is the answer.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use scout_application::{ToolArgs, ToolCallError, ToolCaller, ToolFaultKind};
use scout_domain::RawEnvelope;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const MCP_PROTOCOL_VERSION: &str = "2025-03-26";
const MCP_CLIENT_NAME: &str = "scout";
const SESSION_HEADER: &str = "mcp-session-id";

/// Fragments by which tool servers report TLS trust failures.
const CERTIFICATE_MARKERS: [&str; 4] = [
    "certificate_verify_failed",
    "certificate verify failed",
    "self-signed certificate",
    "self signed certificate",
];
const UNREACHABLE_MARKERS: [&str; 5] = [
    "connecterror",
    "connection refused",
    "timed out",
    "timeout",
    "name or service not known",
];

/// Negotiated MCP session
#[derive(Debug, Clone, Default)]
struct McpSession {
    id: Option<String>,
}

/// Failure of one HTTP exchange, keeping the status for session handling
#[derive(Debug)]
struct ExchangeError {
    status: Option<StatusCode>,
    error: ToolCallError,
}

impl ExchangeError {
    /// A server that dropped the session answers 404 to its id.
    fn session_expired(&self) -> bool {
        self.status == Some(StatusCode::NOT_FOUND)
    }
}

impl From<ToolCallError> for ExchangeError {
    fn from(error: ToolCallError) -> Self {
        Self {
            status: None,
            error,
        }
    }
}

impl From<ExchangeError> for ToolCallError {
    fn from(e: ExchangeError) -> Self {
        e.error
    }
}

/// [`ToolCaller`] for an MCP server reachable over HTTP
pub struct McpHttpToolCaller {
    http: Client,
    endpoint: String,
    session: Mutex<Option<McpSession>>,
    next_id: AtomicU64,
}

impl McpHttpToolCaller {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            session: Mutex::new(None),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: &str, params: Value) -> Value {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        })
    }

    /// Initialize the session on first use.
    async fn session(&self, tool: &str) -> Result<McpSession, ToolCallError> {
        let mut guard = self.session.lock().await;
        if let Some(session) = guard.as_ref() {
            return Ok(session.clone());
        }

        let initialize = self.request(
            "initialize",
            json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {
                    "name": MCP_CLIENT_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                }
            }),
        );
        let (session_id, response) = self.post(tool, None, &initialize).await?;
        if let Some(err) = response.get("error") {
            return Err(ToolCallError::rejected(tool, rpc_error_message(err)));
        }
        let session = McpSession { id: session_id };

        let initialized = json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
        });
        self.notify(tool, session.id.as_deref(), &initialized).await?;

        info!(endpoint = %self.endpoint, session = ?session.id, "MCP session initialized");
        *guard = Some(session.clone());
        Ok(session)
    }

    async fn reset_session(&self) {
        *self.session.lock().await = None;
    }

    async fn send(
        &self,
        tool: &str,
        session_id: Option<&str>,
        body: &Value,
    ) -> Result<reqwest::Response, ExchangeError> {
        let response = self
            .http
            .post(&self.endpoint)
            .headers(headers(session_id))
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(tool, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        let message = format!(
            "MCP endpoint returned HTTP {}: {}",
            status.as_u16(),
            detail.chars().take(400).collect::<String>()
        );
        let error = if status.is_server_error() {
            ToolCallError::unreachable(tool, message)
        } else {
            ToolCallError::rejected(tool, message)
        };
        Err(ExchangeError {
            status: Some(status),
            error,
        })
    }

    /// POST a request and return the session header and JSON-RPC response.
    async fn post(
        &self,
        tool: &str,
        session_id: Option<&str>,
        body: &Value,
    ) -> Result<(Option<String>, Value), ExchangeError> {
        let response = self.send(tool, session_id, body).await?;

        let new_session = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let is_sse = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("text/event-stream"));
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(tool, e))?;

        let value = parse_rpc_body(&text, is_sse).ok_or_else(|| {
            ToolCallError::invalid_response(
                tool,
                format!(
                    "Invalid MCP response: {}",
                    text.chars().take(200).collect::<String>()
                ),
            )
        })?;
        Ok((new_session, value))
    }

    /// POST a notification; the body of the answer is ignored.
    async fn notify(
        &self,
        tool: &str,
        session_id: Option<&str>,
        body: &Value,
    ) -> Result<(), ToolCallError> {
        self.send(tool, session_id, body)
            .await
            .map(|_| ())
            .map_err(ToolCallError::from)
    }
}

#[async_trait]
impl ToolCaller for McpHttpToolCaller {
    async fn call_tool(&self, name: &str, args: ToolArgs) -> Result<RawEnvelope, ToolCallError> {
        let session = self.session(name).await?;
        let request = self.request(
            "tools/call",
            json!({
                "name": name,
                "arguments": Value::Object(args),
            }),
        );

        debug!(tool = name, "MCP tools/call");
        let response = match self.post(name, session.id.as_deref(), &request).await {
            Ok((_, response)) => response,
            Err(e) => {
                if e.session_expired() && session.id.is_some() {
                    info!(session = ?session.id, "MCP session expired, reinitializing on next call");
                    self.reset_session().await;
                }
                return Err(e.into());
            }
        };

        tool_result(name, response).map(RawEnvelope::new)
    }
}

fn headers(session_id: Option<&str>) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/event-stream"),
    );
    map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(id) = session_id
        && let Ok(value) = HeaderValue::from_str(id)
    {
        map.insert(SESSION_HEADER, value);
    }
    map
}

fn transport_error(tool: &str, e: reqwest::Error) -> ToolCallError {
    if e.is_decode() {
        ToolCallError::invalid_response(tool, e.to_string())
    } else {
        ToolCallError::unreachable(tool, e.to_string())
    }
}

/// Parse a JSON body, or the last JSON `data:` frame of an SSE body.
fn parse_rpc_body(text: &str, is_sse: bool) -> Option<Value> {
    if !is_sse {
        return serde_json::from_str(text.trim()).ok();
    }

    let mut last = None;
    let mut frame = String::new();
    for line in text.lines().chain(std::iter::once("")) {
        if let Some(data) = line.strip_prefix("data:") {
            if !frame.is_empty() {
                frame.push('\n');
            }
            frame.push_str(data.trim_start());
        } else if line.trim().is_empty() && !frame.is_empty() {
            if let Ok(value) = serde_json::from_str::<Value>(&frame) {
                last = Some(value);
            }
            frame.clear();
        }
    }
    last
}

/// Turn a `tools/call` response into the tool's result or a classified error.
fn tool_result(tool: &str, response: Value) -> Result<Value, ToolCallError> {
    if let Some(err) = response.get("error") {
        return Err(classify_tool_error(tool, rpc_error_message(err)));
    }

    let result = response.get("result").cloned().ok_or_else(|| {
        ToolCallError::invalid_response(tool, "MCP response has neither result nor error")
    })?;

    if result.get("isError").and_then(Value::as_bool) == Some(true) {
        let message = result
            .get("content")
            .map(render_content)
            .unwrap_or_else(|| "tool reported an error".to_string());
        warn!(tool, "MCP tool returned an error result");
        return Err(classify_tool_error(tool, message));
    }

    Ok(result)
}

fn rpc_error_message(err: &Value) -> String {
    err.get("message")
        .and_then(Value::as_str)
        .unwrap_or("MCP request failed")
        .to_string()
}

fn render_content(value: &Value) -> String {
    let Some(items) = value.as_array() else {
        return value.to_string();
    };
    let chunks: Vec<String> = items
        .iter()
        .map(|item| match item.get("text").and_then(Value::as_str) {
            Some(text) => text.to_string(),
            None => item.to_string(),
        })
        .collect();
    if chunks.is_empty() {
        value.to_string()
    } else {
        chunks.join("\n")
    }
}

/// Classify a server-reported tool error by its message.
///
/// The remote side only returns text, so this is the single place where a
/// message decides the fault kind.
fn classify_tool_error(tool: &str, message: String) -> ToolCallError {
    let lower = message.to_lowercase();
    let kind = if CERTIFICATE_MARKERS.iter().any(|m| lower.contains(m)) {
        ToolFaultKind::Certificate
    } else if UNREACHABLE_MARKERS.iter().any(|m| lower.contains(m)) {
        ToolFaultKind::Unreachable
    } else {
        ToolFaultKind::Rejected
    };
    ToolCallError::new(kind, tool, message)
}
