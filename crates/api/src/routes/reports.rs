use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Report routes mounted at `/reports`.
///
/// ```text
/// GET    /daily             -> list_daily
/// GET    /daily/latest      -> list_latest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily", get(reports::list_daily))
        .route("/daily/latest", get(reports::list_latest))
}
