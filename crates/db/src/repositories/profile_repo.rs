//! Repository for the `profiles` table.

use sqlx::PgPool;

use crate::models::profile::{Profile, UpsertProfile};

/// Column list for `profiles` queries.
const COLUMNS: &str =
    "user_id, current_plan_fee, addons_monthly, mvno_flag, channel_pref, city, updated_at";

/// Provides upsert and lookup for user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert or partially update a profile, returning the stored row.
    ///
    /// Fields left as `None` keep their current value (or the column default
    /// on first insert).
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        input: &UpsertProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles \
                (user_id, current_plan_fee, addons_monthly, mvno_flag, channel_pref, city) \
             VALUES ($1, $2, $3, COALESCE($4, false), $5, $6) \
             ON CONFLICT (user_id) DO UPDATE SET \
                current_plan_fee = COALESCE($2, profiles.current_plan_fee), \
                addons_monthly = COALESCE($3, profiles.addons_monthly), \
                mvno_flag = COALESCE($4, profiles.mvno_flag), \
                channel_pref = COALESCE($5, profiles.channel_pref), \
                city = COALESCE($6, profiles.city), \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(input.current_plan_fee)
            .bind(input.addons_monthly)
            .bind(input.mvno_flag)
            .bind(&input.channel_pref)
            .bind(&input.city)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by user ID.
    pub async fn find(pool: &PgPool, user_id: &str) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
