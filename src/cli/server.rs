//! HTTP server mode
//!
//! Exposes the connector to a browser-side host. The credential travels in
//! the `Authorization: Bearer` header; connection data travels in request
//! and response bodies, exactly as the host would store it.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::Credential;
use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::host::{get_data, get_schema, submit_connection, MemoryHost};
use crate::rows::Row;
use crate::schema::TableDescriptor;
use crate::source::{AirtableClient, BaseSummary, SourceApi};
use crate::state::ConnectionState;

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    config: SourceConfig,
}

/// Request body for `/connect`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectRequest {
    base_id: String,
    #[serde(default)]
    record_id_field: Option<String>,
}

/// Request body for `/schema`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaRequest {
    connection_data: String,
}

/// Request body for `/data`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataRequest {
    connection_data: String,
    table: TableDescriptor,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SchemaResponse {
    tables: Vec<TableDescriptor>,
    connection_data: String,
}

#[derive(Debug, Serialize)]
struct DataResponse {
    rows: Vec<Row>,
}

#[derive(Debug, Serialize)]
struct BasesResponse {
    bases: Vec<BaseSummary>,
    truncated: bool,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

fn fail(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ApiResponse::error(msg))).into_response()
}

/// Status for an error raised while serving a request
fn error_status(e: &Error) -> StatusCode {
    match e {
        Error::State { .. } => StatusCode::BAD_REQUEST,
        e if e.is_access_error() => StatusCode::FORBIDDEN,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Reject connection data the host could never have stored
fn check_connection_data(phase: &str, data: &str) -> std::result::Result<(), Response> {
    ConnectionState::from_connection_data(data)
        .map(|_| ())
        .map_err(|e| fail(error_status(&e), format!("Error during {phase}: {e}")))
}

/// Bearer credential from the request headers
fn credential(headers: &HeaderMap) -> std::result::Result<Credential, Response> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(Credential::from_authorization_header)
        .ok_or_else(|| {
            fail(
                StatusCode::UNAUTHORIZED,
                "Missing bearer token in Authorization header",
            )
        })
}

/// Build the router
pub fn router(config: SourceConfig) -> Router {
    let state = AppState { config };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/bases", get(list_bases))
        .route("/connect", post(connect))
        .route("/schema", post(schema))
        .route("/data", post(data))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: SourceConfig, port: u16) -> Result<()> {
    config.validate()?;
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

/// Bases visible to the token, sorted by name
async fn list_bases(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let credential = match credential(&headers) {
        Ok(c) => c,
        Err(response) => return response,
    };

    let client = match AirtableClient::new(&state.config, credential) {
        Ok(c) => c,
        Err(e) => return fail(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match client.list_bases().await {
        Ok(list) => {
            let truncated = list.is_truncated();
            ok(BasesResponse {
                bases: list.sorted_by_name(),
                truncated,
            })
        }
        Err(e) => fail(error_status(&e), e.to_string()),
    }
}

/// Validate the form and return the initial connection data
async fn connect(Json(req): Json<ConnectRequest>) -> Response {
    let mut host = MemoryHost::new(Credential::new(""));
    match submit_connection(&mut host, &req.base_id, req.record_id_field.as_deref()) {
        Ok(_) => ok(json!({
            "connectionName": host.connection_name(),
            "connectionData": host.connection_data_ref(),
        })),
        Err(e) => fail(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// Schema phase
async fn schema(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SchemaRequest>,
) -> Response {
    let credential = match credential(&headers) {
        Ok(c) => c,
        Err(response) => return response,
    };
    if let Err(response) = check_connection_data("getSchema", &req.connection_data) {
        return response;
    }

    let mut host = MemoryHost::new(credential).with_connection_data(req.connection_data);
    get_schema(&mut host, |c| AirtableClient::new(&state.config, c.clone())).await;

    if let Some(message) = host.errors().first() {
        return fail(StatusCode::BAD_GATEWAY, message.clone());
    }
    let connection_data = host.connection_data_ref().to_string();
    match host.into_schema() {
        Ok(tables) => ok(SchemaResponse {
            tables,
            connection_data,
        }),
        Err(e) => fail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// Data phase for one table
async fn data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<DataRequest>,
) -> Response {
    let credential = match credential(&headers) {
        Ok(c) => c,
        Err(response) => return response,
    };
    if let Err(response) = check_connection_data("getData", &req.connection_data) {
        return response;
    }

    let mut host = MemoryHost::new(credential).with_connection_data(req.connection_data);
    get_data(&mut host, &req.table, |c| {
        AirtableClient::new(&state.config, c.clone())
    })
    .await;

    match host.into_rows() {
        Ok(rows) => ok(DataResponse { rows }),
        Err(e) => fail(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}
