//! Offset-based pagination.
//!
//! ```rust
//! use repairdesk_query::Pagination;
//!
//! // Skip 10, take 20
//! let pagination = Pagination::new()
//!     .skip(10)
//!     .take(20);
//!
//! assert_eq!(pagination.skip, Some(10));
//! assert_eq!(pagination.take, Some(20));
//! assert_eq!(pagination.to_sql(), "LIMIT 20 OFFSET 10");
//!
//! // Page-based pagination (1-indexed)
//! let page_3 = Pagination::page(3, 25);
//! assert_eq!(page_3.skip, Some(50));
//! assert_eq!(page_3.take, Some(25));
//! ```

use std::fmt::Write;

/// Pagination configuration for queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Number of records to skip.
    pub skip: Option<u64>,
    /// Maximum number of records to take.
    pub take: Option<u64>,
}

impl Pagination {
    /// Create a new pagination with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of records to skip.
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Set the maximum number of records to take.
    pub fn take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    /// Check if pagination is specified.
    pub fn is_empty(&self) -> bool {
        self.skip.is_none() && self.take.is_none()
    }

    /// Generate SQL LIMIT/OFFSET clause.
    pub fn to_sql(&self) -> String {
        let mut sql = String::with_capacity(54);

        if let Some(take) = self.take {
            let _ = write!(sql, "LIMIT {}", take);
        }

        if let Some(skip) = self.skip {
            if !sql.is_empty() {
                sql.push(' ');
            }
            let _ = write!(sql, "OFFSET {}", skip);
        }

        sql
    }

    /// Get pagination for the first N records.
    pub fn first(n: u64) -> Self {
        Self::new().take(n)
    }

    /// Get pagination for a page (1-indexed). Page 0 is treated as page 1.
    pub fn page(page: u64, page_size: u64) -> Self {
        let skip = page.saturating_sub(1).saturating_mul(page_size);
        Self::new().skip(skip).take(page_size)
    }

    /// Apply this pagination to an iterator.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skip = self.skip.map_or(0, |s| usize::try_from(s).unwrap_or(usize::MAX));
        let take = self.take.map_or(usize::MAX, |t| usize::try_from(t).unwrap_or(usize::MAX));
        items.into_iter().skip(skip).take(take).collect()
    }
}
