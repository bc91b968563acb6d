//! Request types for the shared crate
//!
//! Common request types used across the API surface

/// Pagination query parameters
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PaginationQuery {
    /// Page number (1-based, default: 1)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page (default: 15, max: 100)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    15
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PaginationQuery {
    /// Get the offset for database queries
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) as u64 * self.limit() as u64
    }

    /// Get the limit (clamped to max 100)
    pub fn limit(&self) -> u32 {
        std::cmp::min(self.per_page.max(1), 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 15);
        assert_eq!(query.offset(), 0);
        assert_eq!(query.limit(), 15);
    }

    #[test]
    fn test_offset() {
        let query = PaginationQuery {
            page: 3,
            per_page: 15,
        };
        assert_eq!(query.offset(), 30);
    }

    #[test]
    fn test_limit_clamped() {
        let query = PaginationQuery {
            page: 1,
            per_page: 500,
        };
        assert_eq!(query.limit(), 100);

        let query = PaginationQuery {
            page: 1,
            per_page: 0,
        };
        assert_eq!(query.limit(), 1);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let query = PaginationQuery {
            page: 0,
            per_page: 15,
        };
        assert_eq!(query.offset(), 0);
    }
}
