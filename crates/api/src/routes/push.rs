use axum::routing::post;
use axum::Router;

use crate::handlers::push;
use crate::state::AppState;

/// Push routes mounted at `/push`.
///
/// ```text
/// POST   /subscribe         -> subscribe
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/subscribe", post(push::subscribe))
}
