use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Whether the database answered the liveness probe.
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
///
/// Always 200; a failed probe is reported in the body.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let probe = tokio::time::timeout(
        state.config.database.query_timeout,
        dealwatch_db::health_check(&state.pool),
    )
    .await;

    let error = match probe {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some("database health check timed out".to_string()),
    };

    if let Some(error) = &error {
        tracing::warn!(error = %error, "Health check failed");
    }

    Json(HealthResponse {
        ok: error.is_none(),
        error,
    })
}
