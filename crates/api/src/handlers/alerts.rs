//! Handlers for a user's alert rules.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use dealwatch_core::rule::{resolve_cooldown_hours, validate_document};
use dealwatch_core::types::DbId;
use dealwatch_db::models::rule::CreateRule;
use dealwatch_db::repositories::RuleRepo;
use serde_json::json;

use crate::error::AppResult;
use crate::query::bounded_read;
use crate::state::AppState;

/// GET /users/{user_id}/alerts
///
/// The user's rules, newest first.
pub async fn list_rules(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let rules = bounded_read(
        state.config.database.query_timeout,
        RuleRepo::list_for_user(&state.pool, &user_id),
    )
    .await?;

    Ok(Json(rules))
}

/// POST /users/{user_id}/alerts
///
/// Returns `{"id": <new rule id>}`.
pub async fn create_rule(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(mut input): Json<CreateRule>,
) -> AppResult<impl IntoResponse> {
    input.cooldown_hours = Some(resolve_cooldown_hours(input.cooldown_hours)?);
    validate_document("constraints", input.constraints.as_ref())?;
    validate_document("thresholds", input.thresholds.as_ref())?;

    let id = RuleRepo::create(&state.pool, &user_id, &input).await?;

    tracing::info!(
        rule_id = id,
        user_id = %user_id,
        rule_type = input.rule_type.as_str(),
        "Rule created"
    );

    Ok(Json(json!({ "id": id })))
}

/// DELETE /users/{user_id}/alerts/{rule_id}
///
/// Always `{"ok": true}`: a rule that is missing or owned by someone else is
/// left untouched without an error.
pub async fn delete_rule(
    State(state): State<AppState>,
    Path((user_id, rule_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let removed = RuleRepo::delete(&state.pool, &user_id, rule_id).await?;

    tracing::debug!(rule_id, user_id = %user_id, removed, "Rule delete requested");

    Ok(Json(json!({ "ok": true })))
}
