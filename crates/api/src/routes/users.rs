//! Per-user routes: profile and alert rules.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{alerts, profile};
use crate::state::AppState;

/// User-scoped routes mounted at `/users`.
///
/// ```text
/// GET    /{user_id}/profile              -> get_profile
/// POST   /{user_id}/profile              -> upsert_profile
/// GET    /{user_id}/alerts               -> list_rules
/// POST   /{user_id}/alerts               -> create_rule
/// DELETE /{user_id}/alerts/{rule_id}     -> delete_rule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{user_id}/profile",
            get(profile::get_profile).post(profile::upsert_profile),
        )
        .route(
            "/{user_id}/alerts",
            get(alerts::list_rules).post(alerts::create_rule),
        )
        .route("/{user_id}/alerts/{rule_id}", delete(alerts::delete_rule))
}
