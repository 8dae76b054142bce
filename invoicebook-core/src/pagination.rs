use serde::Deserialize;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;

/// Raw `?limit=&page=` query parameters.
///
/// Values are kept as strings so that non-numeric input falls back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
}

/// Normalized pagination window. `page` is 1-indexed; both fields are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub page: i64,
}

impl Pagination {
    /// Builds a window, clamping non-positive values to 1.
    pub fn new(limit: i64, page: i64) -> Self {
        Pagination {
            limit: limit.max(1),
            page: page.max(1),
        }
    }

    /// Zero-based row offset handed to the storage layer.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(DEFAULT_LIMIT, DEFAULT_PAGE)
    }
}

impl From<PageQuery> for Pagination {
    fn from(query: PageQuery) -> Self {
        let parse = |raw: Option<String>, default: i64| {
            raw.and_then(|s| s.trim().parse::<i64>().ok())
                .unwrap_or(default)
        };

        Pagination::new(
            parse(query.limit, DEFAULT_LIMIT),
            parse(query.page, DEFAULT_PAGE),
        )
    }
}
