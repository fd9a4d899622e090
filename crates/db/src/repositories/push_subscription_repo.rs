//! Repository for the `push_subscriptions` table.

use sqlx::PgPool;

use crate::models::push_subscription::{CreatePushSubscription, PushSubscription};

/// Column list for `push_subscriptions` queries.
const COLUMNS: &str = "id, user_id, endpoint, p256dh, auth, created_at, updated_at";

/// Provides upsert and listing for web push subscriptions.
pub struct PushSubscriptionRepo;

impl PushSubscriptionRepo {
    /// Insert a subscription or refresh the existing one with the same
    /// endpoint. Re-subscribing an endpoint under another user moves it to
    /// that user.
    pub async fn upsert(
        pool: &PgPool,
        input: &CreatePushSubscription,
    ) -> Result<PushSubscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO push_subscriptions (user_id, endpoint, p256dh, auth) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (endpoint) DO UPDATE SET \
                user_id = EXCLUDED.user_id, \
                p256dh = EXCLUDED.p256dh, \
                auth = EXCLUDED.auth, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PushSubscription>(&query)
            .bind(&input.user_id)
            .bind(&input.endpoint)
            .bind(&input.p256dh)
            .bind(&input.auth)
            .fetch_one(pool)
            .await
    }

    /// List a user's subscriptions, oldest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<PushSubscription>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM push_subscriptions WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, PushSubscription>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
