use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::DashboardError;
use crate::processors::{Metric, QueryOutput};
use crate::server::state::AppState;

/// JSON error payload: `{"error": <message>}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        let status = match err {
            DashboardError::InvalidFormat(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "Server is running",
        "processor": state.dispatcher.selected_engine().as_str(),
    }))
}

pub async fn metric(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<QueryOutput>, ApiError> {
    let metric: Metric = name.parse()?;

    // Aggregation is CPU-bound; keep it off the async workers
    let dispatcher = state.dispatcher.clone();
    let output = tokio::task::spawn_blocking(move || dispatcher.dispatch(metric))
        .await
        .map_err(DashboardError::from)?
        .map_err(|e| {
            error!(%metric, error = %e, "Query failed");
            e
        })?;

    Ok(Json(output))
}
