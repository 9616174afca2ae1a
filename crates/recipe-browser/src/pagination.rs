//! Page cursor, page size and result count.

use recipe_api_rs::models::page_count;
use serde::Serialize;

use crate::error::{BrowserError, Result};

/// The page sizes a user can choose from.
pub const PAGE_SIZES: [u32; 6] = [15, 20, 25, 30, 40, 50];

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Returns true if `size` is one of [`PAGE_SIZES`].
pub fn is_valid_page_size(size: u32) -> bool {
    PAGE_SIZES.contains(&size)
}

/// Pagination state.
///
/// `page` is kept in `[1, total_pages()]` after every update, where
/// `total_pages()` is `max(1, ceil(total / limit))`. Navigation past either
/// end is a no-op rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: u32,
    limit: u32,
    total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Creates pagination on page 1 with nothing counted yet.
    ///
    /// An invalid `limit` falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(limit: u32) -> Self {
        let limit = if is_valid_page_size(limit) {
            limit
        } else {
            DEFAULT_PAGE_SIZE
        };
        Self {
            page: 1,
            limit,
            total: 0,
        }
    }

    /// Current page (1-based).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Current page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Last known number of matching recipes.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> u32 {
        page_count(self.total, self.limit)
    }

    /// Records a new result count and page size, clamping the page.
    ///
    /// A `limit` that is not one of [`PAGE_SIZES`] is ignored and the current
    /// size kept. Returns the page after clamping.
    pub fn advance(&mut self, total: u64, limit: u32) -> u32 {
        self.total = total;
        if is_valid_page_size(limit) {
            self.limit = limit;
        }
        self.clamp();
        self.page
    }

    /// Moves to page `n`, clamped into `[1, total_pages()]`.
    ///
    /// Returns true if the page changed.
    pub fn set_page(&mut self, n: u32) -> bool {
        let target = n.clamp(1, self.total_pages());
        let changed = target != self.page;
        self.page = target;
        changed
    }

    /// Changes the page size and goes back to page 1.
    ///
    /// Setting the current size again leaves the page alone. Returns true if
    /// anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::InvalidPageSize`] if `limit` is not one of
    /// [`PAGE_SIZES`].
    pub fn set_limit(&mut self, limit: u32) -> Result<bool> {
        if !is_valid_page_size(limit) {
            return Err(BrowserError::InvalidPageSize { size: limit });
        }
        if limit == self.limit {
            return Ok(false);
        }
        self.limit = limit;
        self.page = 1;
        Ok(true)
    }

    /// Goes back to page 1. Returns true if the page changed.
    pub fn reset_page(&mut self) -> bool {
        let changed = self.page != 1;
        self.page = 1;
        changed
    }

    /// Returns true if there is a page before this one.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Returns true if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn first(&mut self) -> bool {
        self.set_page(1)
    }

    pub fn prev(&mut self) -> bool {
        self.has_prev() && self.set_page(self.page - 1)
    }

    pub fn next(&mut self) -> bool {
        self.has_next() && self.set_page(self.page + 1)
    }

    pub fn last(&mut self) -> bool {
        self.set_page(self.total_pages())
    }

    fn clamp(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_total(total: u64, limit: u32) -> Pagination {
        let mut p = Pagination::new(limit);
        p.advance(total, limit);
        p
    }

    #[test]
    fn test_new_defaults() {
        let p = Pagination::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 15);
        assert_eq!(p.total(), 0);
        assert_eq!(p.total_pages(), 1);
    }

    #[test]
    fn test_new_invalid_limit_falls_back() {
        assert_eq!(Pagination::new(17).limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(Pagination::new(40).limit(), 40);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(with_total(47, 15).total_pages(), 4);
        assert_eq!(with_total(45, 15).total_pages(), 3);
        assert_eq!(with_total(1, 50).total_pages(), 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut p = with_total(47, 15);
        assert!(p.set_page(10));
        assert_eq!(p.page(), 4);
        assert!(p.set_page(0));
        assert_eq!(p.page(), 1);
        assert!(!p.set_page(1));
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let mut p = with_total(47, 15);
        p.set_page(4);
        assert_eq!(p.advance(20, 15), 2);
        assert_eq!(p.advance(0, 15), 1);
        assert_eq!(p.total_pages(), 1);
    }

    #[test]
    fn test_advance_ignores_invalid_limit() {
        let mut p = with_total(100, 20);
        p.advance(100, 7);
        assert_eq!(p.limit(), 20);
        assert_eq!(p.total_pages(), 5);
    }

    #[test]
    fn test_set_limit_resets_page() {
        let mut p = with_total(200, 15);
        p.set_page(3);
        assert!(p.set_limit(25).unwrap());
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 25);
    }

    #[test]
    fn test_set_limit_same_value_keeps_page() {
        let mut p = with_total(200, 15);
        p.set_page(3);
        assert!(!p.set_limit(15).unwrap());
        assert_eq!(p.page(), 3);
    }

    #[test]
    fn test_set_limit_rejects_unknown_size() {
        let mut p = with_total(200, 15);
        p.set_page(2);
        let err = p.set_limit(100).unwrap_err();
        assert_eq!(err, BrowserError::InvalidPageSize { size: 100 });
        assert_eq!(p.limit(), 15);
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn test_navigation_disabled_at_boundaries() {
        let mut p = with_total(47, 15);
        assert!(!p.has_prev());
        assert!(!p.prev());
        assert!(!p.first());
        assert_eq!(p.page(), 1);

        assert!(p.last());
        assert_eq!(p.page(), 4);
        assert!(!p.has_next());
        assert!(!p.next());
        assert!(!p.last());
        assert_eq!(p.page(), 4);

        assert!(p.prev());
        assert_eq!(p.page(), 3);
        assert!(p.next());
        assert_eq!(p.page(), 4);
    }

    #[test]
    fn test_single_page_disables_everything() {
        let mut p = with_total(3, 15);
        assert!(!p.has_prev());
        assert!(!p.has_next());
        assert!(!p.next());
        assert!(!p.last());
    }

    #[test]
    fn test_reset_page() {
        let mut p = with_total(100, 15);
        p.set_page(5);
        assert!(p.reset_page());
        assert!(!p.reset_page());
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_page_sizes() {
        for size in PAGE_SIZES {
            assert!(is_valid_page_size(size));
        }
        assert!(!is_valid_page_size(0));
        assert!(!is_valid_page_size(10));
    }
}
