use axum::routing::get;
use axum::Router;

use crate::handlers::deals;
use crate::state::AppState;

/// Deal routes mounted at `/deals`.
///
/// ```text
/// GET    /                  -> list_deals
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(deals::list_deals))
}
