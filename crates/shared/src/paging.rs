//! Page and feed-limit helpers for list endpoints.

use serde::Deserialize;

/// Default page size for paginated admin listings.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Hard cap on page size.
pub const MAX_PER_PAGE: i64 = 100;

/// Fixed row cap for chat-style feeds (most recent rows only).
pub const FEED_LIMIT: i64 = 50;

/// Query parameters for paginated listings.
#[derive(Debug, Clone, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageParams {
    /// Returns the page clamped to sane bounds.
    pub fn clamped(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.clamped().per_page
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        let p = self.clamped();
        (p.page - 1) * p.per_page
    }

    /// Number of pages needed to cover `total` rows.
    pub fn total_pages(&self, total: i64) -> i64 {
        let per_page = self.clamped().per_page;
        (total + per_page - 1) / per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params: PageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_clamping() {
        let params = PageParams {
            page: 0,
            per_page: 10_000,
        };
        let clamped = params.clamped();
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_limit_offset() {
        let params = PageParams {
            page: 3,
            per_page: 20,
        };
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_total_pages() {
        let params = PageParams {
            page: 1,
            per_page: 20,
        };
        assert_eq!(params.total_pages(0), 0);
        assert_eq!(params.total_pages(20), 1);
        assert_eq!(params.total_pages(21), 2);
    }
}
