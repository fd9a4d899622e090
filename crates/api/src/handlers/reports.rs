//! Handlers for daily price reports.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use dealwatch_core::error::CoreError;
use dealwatch_core::payload::decode_document;
use dealwatch_db::repositories::ReportRepo;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::query::{bounded_read, PaginationParams};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReportListParams {
    /// Exact report date, `YYYY-MM-DD`.
    pub date: Option<String>,
    pub model: Option<String>,
}

/// GET /reports/daily
///
/// With `date`, every report for that day. Without it, the report history
/// newest first, optionally for a single `model`.
pub async fn list_daily(
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
    Query(paging): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = paging.page()?;
    let timeout = state.config.database.query_timeout;

    let date = params.date.as_deref().filter(|d| !d.is_empty());
    let model = params.model.as_deref().filter(|m| !m.is_empty());

    let raw = match date {
        Some(date) => {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                CoreError::Validation(format!("date must be YYYY-MM-DD, got '{date}'"))
            })?;
            bounded_read(timeout, ReportRepo::list_by_date(&state.pool, date, page)).await?
        }
        None => bounded_read(timeout, ReportRepo::list(&state.pool, model, page)).await?,
    };

    Ok(Json(decode_all(raw)?))
}

/// GET /reports/daily/latest
///
/// The most recent report for each model and capacity.
pub async fn list_latest(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let raw = bounded_read(
        state.config.database.query_timeout,
        ReportRepo::list_latest(&state.pool),
    )
    .await?;

    Ok(Json(decode_all(raw)?))
}

fn decode_all(raw: Vec<Value>) -> Result<Vec<Value>, CoreError> {
    raw.into_iter().map(decode_document).collect()
}
