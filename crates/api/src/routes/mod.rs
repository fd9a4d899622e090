pub mod deals;
pub mod health;
pub mod push;
pub mod reports;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// ```text
/// /health                                  liveness probe
///
/// /deals                                   filtered deal listing
///
/// /reports/daily                           report history / single day
/// /reports/daily/latest                    latest per model and capacity
///
/// /users/{user_id}/profile                 get, upsert
/// /users/{user_id}/alerts                  list, create rules
/// /users/{user_id}/alerts/{rule_id}        delete rule
///
/// /push/subscribe                          register push endpoint
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/deals", deals::router())
        .nest("/reports", reports::router())
        .nest("/users", users::router())
        .nest("/push", push::router())
}
