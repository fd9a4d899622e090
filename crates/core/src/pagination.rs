//! Limit/offset pagination shared by the deal and report listings.
//!
//! Out-of-range values are rejected rather than clamped so that a client
//! always receives exactly the slice it asked for.

use crate::error::CoreError;

/// Page size used when the client omits `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Largest accepted `limit`.
pub const MAX_PAGE_LIMIT: i64 = 200;

/// A validated limit/offset pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    /// Validate raw query parameters.
    ///
    /// `limit` must lie in `1..=200` (default 50); `offset` must be
    /// non-negative (default 0).
    pub fn from_params(limit: Option<i64>, offset: Option<i64>) -> Result<Self, CoreError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(CoreError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"
            )));
        }

        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(CoreError::Validation(format!(
                "offset must be non-negative, got {offset}"
            )));
        }

        Ok(Self { limit, offset })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_apply_when_params_missing() {
        assert_eq!(Page::from_params(None, None).unwrap(), Page::default());
        assert_eq!(Page::default().limit, 50);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(Page::from_params(Some(1), Some(0)).unwrap().limit, 1);
        assert_eq!(Page::from_params(Some(200), None).unwrap().limit, 200);
    }

    #[test]
    fn limit_outside_range_is_rejected() {
        assert_matches!(Page::from_params(Some(0), None), Err(CoreError::Validation(_)));
        assert_matches!(Page::from_params(Some(201), None), Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_offset_is_rejected() {
        assert_matches!(Page::from_params(None, Some(-1)), Err(CoreError::Validation(_)));
    }
}
