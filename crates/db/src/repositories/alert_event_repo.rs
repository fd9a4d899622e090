//! Repository for the `alert_events` queue.

use dealwatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::alert_event::{AlertEvent, CreateAlertEvent, PendingDelivery};

/// Column list for `alert_events` queries.
const COLUMNS: &str =
    "id, user_id, deal_id, rule_id, attempts, last_attempt_at, sent_at, created_at";

/// Provides queue operations for alert events.
pub struct AlertEventRepo;

impl AlertEventRepo {
    /// Enqueue an alert for a user.
    pub async fn create(pool: &PgPool, input: &CreateAlertEvent) -> Result<AlertEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO alert_events (user_id, deal_id, rule_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AlertEvent>(&query)
            .bind(&input.user_id)
            .bind(&input.deal_id)
            .bind(input.rule_id)
            .fetch_one(pool)
            .await
    }

    /// Find an alert event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AlertEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alert_events WHERE id = $1");
        sqlx::query_as::<_, AlertEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Select up to `batch_size` unsent events joined to their user's push
    /// subscriptions, oldest event first.
    ///
    /// Events whose user has no subscription produce no rows. When
    /// `max_attempts` is positive, events that already failed that many
    /// times are excluded; `0` disables the cap.
    pub async fn list_pending_deliveries(
        pool: &PgPool,
        batch_size: i64,
        max_attempts: i32,
    ) -> Result<Vec<PendingDelivery>, sqlx::Error> {
        sqlx::query_as::<_, PendingDelivery>(
            "SELECT ae.id AS event_id, ae.user_id, ae.deal_id, \
                    s.endpoint, s.p256dh, s.auth \
             FROM alert_events ae \
             JOIN push_subscriptions s ON s.user_id = ae.user_id \
             WHERE ae.sent_at IS NULL \
               AND ($2 <= 0 OR ae.attempts < $2) \
             ORDER BY ae.id ASC, s.id ASC \
             LIMIT $1",
        )
        .bind(batch_size)
        .bind(max_attempts)
        .fetch_all(pool)
        .await
    }

    /// Mark an event as delivered.
    ///
    /// Only the first call sets `sent_at`; returns `false` if the event was
    /// already sent or does not exist.
    pub async fn mark_sent(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE alert_events SET sent_at = NOW() \
             WHERE id = $1 AND sent_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a failed delivery attempt for an unsent event.
    pub async fn record_failure(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE alert_events \
             SET attempts = attempts + 1, last_attempt_at = NOW() \
             WHERE id = $1 AND sent_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
