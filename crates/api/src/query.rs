//! Shared query helpers for API handlers.

use std::future::Future;
use std::time::Duration;

use dealwatch_core::pagination::Page;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Pagination parameters (`?limit=&offset=`).
///
/// Validated by [`Page::from_params`]; out-of-range values are rejected.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> AppResult<Page> {
        Ok(Page::from_params(self.limit, self.offset)?)
    }
}

/// Run a read query, giving up after `limit`.
///
/// Every read issued by a handler goes through here so a stalled database
/// turns into a 504 instead of a hung request.
pub async fn bounded_read<T, F>(limit: Duration, query: F) -> AppResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AppError::Timeout(limit)),
    }
}
