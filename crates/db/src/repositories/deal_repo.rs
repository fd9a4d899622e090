//! Read-only access to the `api_deals_json` view.

use dealwatch_core::deal::{DealFilters, DealSort};
use dealwatch_core::pagination::Page;
use sqlx::PgPool;

/// Queries over parsed deal documents.
pub struct DealRepo;

impl DealRepo {
    /// List raw deal documents matching `filters`, ordered by `sort`.
    ///
    /// Documents are returned exactly as stored; callers apply the output
    /// transform in [`dealwatch_core::deal::normalize_deal`].
    pub async fn list(
        pool: &PgPool,
        filters: &DealFilters,
        sort: DealSort,
        page: Page,
    ) -> Result<Vec<serde_json::Value>, sqlx::Error> {
        let active = filters.active();

        let mut query = String::from("SELECT deal FROM api_deals_json WHERE 1=1");
        let mut param_idx: usize = 1;
        for (field, _) in &active {
            // Field names come from a fixed list in core, never from input.
            query.push_str(&format!(" AND (deal->>'{field}') = ${param_idx}"));
            param_idx += 1;
        }

        let order = match sort {
            DealSort::Latest => "(deal->>'parsed_at')::timestamptz DESC NULLS LAST",
            DealSort::TcoAsc => {
                "(deal->>'tco_total')::numeric ASC NULLS LAST, \
                 (deal->>'parsed_at')::timestamptz DESC NULLS LAST"
            }
        };
        query.push_str(&format!(
            " ORDER BY {order} LIMIT ${} OFFSET ${}",
            param_idx,
            param_idx + 1
        ));

        let mut q = sqlx::query_scalar::<_, serde_json::Value>(&query);
        for (_, value) in &active {
            q = q.bind(*value);
        }
        q.bind(page.limit).bind(page.offset).fetch_all(pool).await
    }
}
