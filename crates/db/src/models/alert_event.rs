//! Alert event queue models.

use dealwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `alert_events` table.
///
/// `sent_at` is set once on the first successful delivery and never cleared.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertEvent {
    pub id: DbId,
    pub user_id: String,
    pub deal_id: String,
    pub rule_id: Option<DbId>,
    /// Number of failed delivery attempts so far.
    pub attempts: i32,
    pub last_attempt_at: Option<Timestamp>,
    pub sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO used by the deal matcher to enqueue an alert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlertEvent {
    pub user_id: String,
    pub deal_id: String,
    pub rule_id: Option<DbId>,
}

/// An unsent alert event joined to one of its user's push subscriptions.
#[derive(Debug, Clone, FromRow)]
pub struct PendingDelivery {
    pub event_id: DbId,
    pub user_id: String,
    pub deal_id: String,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}
