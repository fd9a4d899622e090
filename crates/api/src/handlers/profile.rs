//! Handlers for user profiles.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use dealwatch_core::error::CoreError;
use dealwatch_db::models::profile::UpsertProfile;
use dealwatch_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::query::bounded_read;
use crate::state::AppState;

/// POST /users/{user_id}/profile
///
/// Create or partially update a profile. Omitted fields keep their stored
/// value. Returns the full row.
pub async fn upsert_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(input): Json<UpsertProfile>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::upsert(&state.pool, &user_id, &input).await?;

    tracing::info!(user_id = %user_id, "Profile upserted");

    Ok(Json(profile))
}

/// GET /users/{user_id}/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let found = bounded_read(
        state.config.database.query_timeout,
        ProfileRepo::find(&state.pool, &user_id),
    )
    .await?;

    let profile = found.ok_or(AppError::Core(CoreError::NotFound {
        entity: "Profile",
        id: user_id,
    }))?;

    Ok(Json(profile))
}
