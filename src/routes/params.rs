use serde::Deserialize;
use utoipa::ToSchema;

const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;
// The store binds offsets as signed 64-bit integers.
const MAX_SKIP: u64 = i64::MAX as u64;

#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl Pagination {
    /// Returns `(page, limit, skip)` with page >= 1, limit in 1..=100 and
    /// skip no larger than `i64::MAX`. Pages past that bound are clamped.
    pub fn normalize(&self) -> (u64, u64, u64) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let last_page = MAX_SKIP / limit + 1;
        let page = self.page.unwrap_or(1).clamp(1, last_page);
        let skip = (page - 1) * limit;
        (page, limit, skip)
    }
}

/// Optional text filter accepted by the category and deal listings.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
