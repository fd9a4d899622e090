//! Read-only access to the daily report views.

use dealwatch_core::pagination::Page;
use sqlx::PgPool;

/// Row cap for the latest-snapshot listing.
pub const LATEST_REPORTS_LIMIT: i64 = 1000;

/// Queries over daily report documents.
pub struct ReportRepo;

impl ReportRepo {
    /// Report history, newest date first, optionally restricted to one model.
    pub async fn list(
        pool: &PgPool,
        model: Option<&str>,
        page: Page,
    ) -> Result<Vec<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT report FROM api_reports_daily_json \
             WHERE ($1::text IS NULL OR (report->>'model') = $1) \
             ORDER BY (report->>'ts')::date DESC, (report->>'model') ASC, \
                      (report->>'capacity') ASC NULLS LAST \
             LIMIT $2 OFFSET $3",
        )
        .bind(model)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await
    }

    /// All reports for one exact date (`YYYY-MM-DD`).
    pub async fn list_by_date(
        pool: &PgPool,
        date: &str,
        page: Page,
    ) -> Result<Vec<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT report FROM api_reports_daily_json \
             WHERE (report->>'ts') = $1 \
             ORDER BY (report->>'model') ASC, (report->>'capacity') ASC NULLS LAST \
             LIMIT $2 OFFSET $3",
        )
        .bind(date)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await
    }

    /// The most recent report per model and capacity.
    pub async fn list_latest(pool: &PgPool) -> Result<Vec<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT report FROM api_reports_daily_latest_json \
             ORDER BY (report->>'ts')::date DESC, (report->>'model') ASC, \
                      (report->>'capacity') ASC NULLS LAST \
             LIMIT $1",
        )
        .bind(LATEST_REPORTS_LIMIT)
        .fetch_all(pool)
        .await
    }
}
