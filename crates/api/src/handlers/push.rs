//! Handler for web push subscription registration.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use dealwatch_core::error::CoreError;
use dealwatch_db::models::push_subscription::CreatePushSubscription;
use dealwatch_db::repositories::PushSubscriptionRepo;
use serde_json::json;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /push/subscribe
///
/// Registers (or re-keys) a browser endpoint for a user. An endpoint already
/// registered to another user moves to this one.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<CreatePushSubscription>,
) -> AppResult<impl IntoResponse> {
    for (field, value) in [
        ("user_id", &input.user_id),
        ("endpoint", &input.endpoint),
        ("p256dh", &input.p256dh),
        ("auth", &input.auth),
    ] {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!("{field} must not be empty")).into());
        }
    }

    let subscription = PushSubscriptionRepo::upsert(&state.pool, &input).await?;

    tracing::info!(
        subscription_id = subscription.id,
        user_id = %subscription.user_id,
        "Push subscription stored"
    );

    Ok(Json(json!({ "ok": true })))
}
