use serde::Deserialize;
use utoipa::IntoParams;

/// Maximum number of items a single page may request
pub const MAX_LIMIT: i64 = 100;

/// Default page size when `limit` is omitted
pub const DEFAULT_LIMIT: i64 = 100;

/// Pagination parameters for catalog listing
///
/// Both fields are optional: `skip` defaults to 0, `limit` to 100.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct Pagination {
    /// Number of records to skip
    pub skip: Option<i64>,
    /// Maximum number of records to return (capped at 100)
    pub limit: Option<i64>,
}

impl Pagination {
    /// Resolve the raw parameters into concrete (skip, limit) bounds
    ///
    /// Negative values are treated as absent rather than rejected, so they
    /// fall back to the same defaults omission gives. The limit is capped
    /// at MAX_LIMIT so a single request cannot ask for an unbounded result
    /// set.
    pub fn resolve(self) -> (i64, i64) {
        let skip = self.skip.filter(|s| *s >= 0).unwrap_or(0);
        let limit = self
            .limit
            .filter(|l| *l >= 0)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        (skip, limit)
    }
}
