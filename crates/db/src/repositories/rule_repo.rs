//! Repository for the `rules` table.

use dealwatch_core::rule::{build_filters, RuleFrequency, DEFAULT_COOLDOWN_HOURS};
use dealwatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::rule::{CreateRule, Rule};

/// Column list for `rules` queries.
const COLUMNS: &str = "id, user_id, type, frequency, cooldown_hours, enabled, \
                       constraints, thresholds, filters, created_at, updated_at";

/// Provides CRUD operations for alert rules.
pub struct RuleRepo;

impl RuleRepo {
    /// List a user's rules, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<Rule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rules WHERE user_id = $1 ORDER BY id DESC");
        sqlx::query_as::<_, Rule>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a rule, returning its generated ID.
    ///
    /// Defaults: `frequency = immediate`, `cooldown_hours = 3`,
    /// `enabled = true`, empty `constraints` / `thresholds` objects.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        input: &CreateRule,
    ) -> Result<DbId, sqlx::Error> {
        let filters = build_filters(
            input.models.as_deref(),
            input.carriers.as_deref(),
            input.channels.as_deref(),
            input.city.as_deref(),
        );
        let empty = || serde_json::Value::Object(serde_json::Map::new());

        sqlx::query_scalar(
            "INSERT INTO rules \
                (user_id, type, frequency, cooldown_hours, enabled, constraints, thresholds, filters) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(input.rule_type.as_str())
        .bind(input.frequency.unwrap_or(RuleFrequency::Immediate).as_str())
        .bind(input.cooldown_hours.unwrap_or(DEFAULT_COOLDOWN_HOURS))
        .bind(input.enabled.unwrap_or(true))
        .bind(input.constraints.clone().unwrap_or_else(empty))
        .bind(input.thresholds.clone().unwrap_or_else(empty))
        .bind(filters)
        .fetch_one(pool)
        .await
    }

    /// Delete a rule owned by `user_id`.
    ///
    /// Returns the number of rows removed; a rule owned by someone else is
    /// left alone and yields 0.
    pub async fn delete(pool: &PgPool, user_id: &str, rule_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rules WHERE id = $1 AND user_id = $2")
            .bind(rule_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
