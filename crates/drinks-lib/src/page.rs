//! Offset/limit pagination window.

use crate::error::{Error, Result};

/// Number of items returned when the caller does not ask for a limit.
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// A bounded, skip-adjusted window over a collection's natural order.
///
/// Always holds `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    skip: u64,
    limit: u32,
}

impl Page {
    /// Build a page, rejecting limits outside `1..=MAX_LIMIT`.
    pub fn new(skip: u64, limit: u32) -> Result<Self> {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(Error::InvalidPage { limit });
        }
        Ok(Self { skip, limit })
    }

    /// Number of leading items to pass over.
    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum number of items to return.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Apply the window to an in-memory sequence.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.skip)
            .unwrap_or(usize::MAX)
            .min(items.len());
        let end = start.saturating_add(self.limit as usize).min(items.len());
        &items[start..end]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_uses_default_limit() {
        let page = Page::default();
        assert_eq!(page.skip(), 0);
        assert_eq!(page.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn limit_bounds_are_enforced() {
        assert!(Page::new(0, 1).is_ok());
        assert!(Page::new(0, MAX_LIMIT).is_ok());
        assert!(matches!(
            Page::new(0, 0),
            Err(Error::InvalidPage { limit: 0 })
        ));
        assert!(matches!(
            Page::new(0, MAX_LIMIT + 1),
            Err(Error::InvalidPage { limit: 101 })
        ));
    }

    #[test]
    fn slice_skips_then_limits() {
        let items: Vec<u32> = (0..10).collect();
        let page = Page::new(3, 4).unwrap();
        assert_eq!(page.slice(&items), &[3, 4, 5, 6]);
    }

    #[test]
    fn slice_past_end_is_empty() {
        let items = [1, 2, 3];
        let page = Page::new(10, 5).unwrap();
        assert!(page.slice(&items).is_empty());

        let tail = Page::new(2, 5).unwrap();
        assert_eq!(tail.slice(&items), &[3]);
    }
}
