//! User profile model and upsert DTO.

use dealwatch_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub user_id: String,
    pub current_plan_fee: Option<i32>,
    pub addons_monthly: Option<i32>,
    pub mvno_flag: bool,
    /// `online_only` or `offline_ok`.
    pub channel_pref: Option<String>,
    pub city: Option<String>,
    pub updated_at: Timestamp,
}

/// Partial profile update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertProfile {
    pub current_plan_fee: Option<i32>,
    pub addons_monthly: Option<i32>,
    pub mvno_flag: Option<bool>,
    pub channel_pref: Option<String>,
    pub city: Option<String>,
}
