//! HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use agent_core::{AgentError, ToolCall, ToolResult, ToolSchema};
use freight_advisor::{CustomsPolicy, Specialist};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub tools: usize,
    pub quotes_saved: usize,
    pub customs_policy: CustomsPolicy,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// `None` when no specialist keyword matched
    pub specialist: Option<Specialist>,
    pub description: Option<&'static str>,
    pub instruction: Option<&'static str>,
    pub tools: Vec<ToolSchema>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let quotes_saved = state.store.history(None, 0).await.total;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        tools: state.tools.len(),
        quotes_saved,
        customs_policy: state.config.customs_policy,
    })
}

/// All tool schemas, sorted by name
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolSchema>> {
    Json(state.tools.schemas())
}

/// Run one tool with the request body as its keyword arguments.
///
/// Every domain outcome, including lookup misses and rejected input, is a
/// 200 carrying the tool's status.
pub async fn execute_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(arguments): Json<HashMap<String, Value>>,
) -> Result<Json<ToolResult>, ApiError> {
    let call = ToolCall {
        name,
        arguments,
        id: None,
    };

    state.tools.execute(&call).await.map(Json).map_err(|e| match e {
        AgentError::ToolNotFound(name) => {
            api_error(StatusCode::NOT_FOUND, "TOOL_NOT_FOUND", format!("Unknown tool: {}", name))
        }
        AgentError::ToolValidation(msg) => api_error(StatusCode::BAD_REQUEST, "INVALID_ARGUMENTS", msg),
        other => {
            tracing::error!(tool = %call.name, error = %other, "Tool execution failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "TOOL_FAILED", other.to_string())
        }
    })
}

/// Pick the specialist for a free-text request
pub async fn route_message(
    State(state): State<AppState>,
    Json(payload): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    if payload.message.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "EMPTY_MESSAGE", "message must not be empty"));
    }

    let specialist = Specialist::classify(&payload.message);
    tracing::info!(
        specialist = specialist.map_or("none", |s| s.name()),
        "Request routed"
    );

    Ok(Json(RouteResponse {
        specialist,
        description: specialist.map(|s| s.description()),
        instruction: specialist.map(|s| s.instruction()),
        tools: specialist
            .map(|s| state.tools.schemas_for(s.tool_names()))
            .unwrap_or_default(),
    }))
}
