//! Alert rule entity model and DTOs.

use dealwatch_core::rule::{RuleChannel, RuleFrequency, RuleType};
use dealwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rule {
    pub id: DbId,
    pub user_id: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub rule_type: String,
    pub frequency: String,
    pub cooldown_hours: i32,
    pub enabled: bool,
    pub constraints: serde_json::Value,
    pub thresholds: serde_json::Value,
    pub filters: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a rule. Omitted fields take the column defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRule {
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub models: Option<Vec<String>>,
    pub carriers: Option<Vec<String>>,
    pub channels: Option<Vec<RuleChannel>>,
    pub city: Option<String>,
    pub frequency: Option<RuleFrequency>,
    pub cooldown_hours: Option<i32>,
    pub enabled: Option<bool>,
    pub constraints: Option<serde_json::Value>,
    pub thresholds: Option<serde_json::Value>,
}
