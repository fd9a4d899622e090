//! Handlers for the deal listing.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use dealwatch_core::deal::{normalize_deal, DealFilters, DealSort};
use dealwatch_db::repositories::DealRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::query::{bounded_read, PaginationParams};
use crate::state::AppState;

/// `?sort=` for the deal listing. Unknown values are rejected with 400.
#[derive(Debug, Default, Deserialize)]
pub struct DealSortParams {
    #[serde(default)]
    pub sort: DealSort,
}

/// GET /deals
///
/// Filtered, sorted, paginated deal documents with `cash_delta` folded into
/// `support_cash`.
pub async fn list_deals(
    State(state): State<AppState>,
    Query(filters): Query<DealFilters>,
    Query(sort): Query<DealSortParams>,
    Query(paging): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = paging.page()?;

    let raw = bounded_read(
        state.config.database.query_timeout,
        DealRepo::list(&state.pool, &filters, sort.sort, page),
    )
    .await?;

    let deals = raw
        .into_iter()
        .map(normalize_deal)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(deals))
}
