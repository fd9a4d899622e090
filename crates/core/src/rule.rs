//! Alert rule vocabulary and creation defaults.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CoreError;

/// Cooldown applied when a rule is created without one.
pub const DEFAULT_COOLDOWN_HOURS: i32 = 3;

/// What kind of deal a rule watches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    StrictMatch,
    Cheapest,
    BigDrop,
    BestDiscount,
}

impl RuleType {
    /// Value stored in `rules.type`.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::StrictMatch => "STRICT_MATCH",
            RuleType::Cheapest => "CHEAPEST",
            RuleType::BigDrop => "BIG_DROP",
            RuleType::BestDiscount => "BEST_DISCOUNT",
        }
    }
}

/// How often a matching rule may notify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleFrequency {
    #[default]
    Immediate,
    Daily,
}

impl RuleFrequency {
    /// Value stored in `rules.frequency`.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleFrequency::Immediate => "immediate",
            RuleFrequency::Daily => "daily",
        }
    }
}

/// Sales channel a rule can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleChannel {
    Online,
    Offline,
}

/// Resolve the cooldown for a new rule, rejecting negative values.
pub fn resolve_cooldown_hours(requested: Option<i32>) -> Result<i32, CoreError> {
    match requested {
        None => Ok(DEFAULT_COOLDOWN_HOURS),
        Some(h) if h < 0 => Err(CoreError::Validation(format!(
            "cooldown_hours must be non-negative, got {h}"
        ))),
        Some(h) => Ok(h),
    }
}

/// Build the `filters` document stored with a rule.
///
/// All four keys are always present; unspecified ones are `null`.
pub fn build_filters(
    models: Option<&[String]>,
    carriers: Option<&[String]>,
    channels: Option<&[RuleChannel]>,
    city: Option<&str>,
) -> Value {
    json!({
        "models": models,
        "carriers": carriers,
        "channels": channels,
        "city": city,
    })
}

/// Require an optional rule document (`constraints`, `thresholds`) to be a
/// JSON object when present.
pub fn validate_document(field: &str, value: Option<&Value>) -> Result<(), CoreError> {
    match value {
        None | Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(CoreError::Validation(format!(
            "{field} must be a JSON object"
        ))),
    }
}
