//! Offset pagination.

use std::ops::Range;

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE_NUMBER: u32 = 0;
/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Zero-based page selection. Absent fields fall back to the defaults.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page_number: Option<u32>,
    /// Number of items per page.
    pub page_size: Option<u32>,
}

impl PageRequest {
    /// Request an explicit page.
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
        }
    }

    /// A single page large enough to hold any result.
    pub fn unbounded() -> Self {
        Self::new(0, u32::MAX)
    }

    /// Effective page number.
    pub fn page_number(&self) -> u32 {
        self.page_number.unwrap_or(DEFAULT_PAGE_NUMBER)
    }

    /// Effective page size.
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Index range of this page within a sequence of `len` items.
    ///
    /// A page that starts at or beyond the end yields an empty range.
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let page = self.page_number() as usize;
        let size = self.page_size() as usize;
        let from = page.saturating_mul(size);
        let to = page.saturating_add(1).saturating_mul(size).min(len);
        if from >= to { 0..0 } else { from..to }
    }

    /// Take this page out of an already ordered sequence.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let range = self.bounds(items.len());
        items
            .into_iter()
            .skip(range.start)
            .take(range.len())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::PageRequest;

    fn ten() -> Vec<u32> {
        (0..10).collect()
    }

    #[test]
    fn defaults_to_first_page_of_three() {
        let page = PageRequest::default();
        assert_eq!(page.page_number(), 0);
        assert_eq!(page.page_size(), 3);
        assert_eq!(page.slice(ten()), vec![0, 1, 2]);
    }

    #[test]
    fn last_partial_page_is_truncated() {
        let page = PageRequest::new(3, 3);
        assert_eq!(page.bounds(10), 9..10);
        assert_eq!(page.slice(ten()), vec![9]);
    }

    #[test]
    fn page_beyond_the_end_is_empty() {
        let page = PageRequest::new(4, 3);
        assert_eq!(page.bounds(10), 0..0);
        assert!(page.slice(ten()).is_empty());
    }

    #[test]
    fn page_exactly_at_the_end_is_empty() {
        assert!(PageRequest::new(2, 5).slice(ten()).is_empty());
    }

    #[test]
    fn zero_page_size_is_empty() {
        assert!(PageRequest::new(0, 0).slice(ten()).is_empty());
    }

    #[test]
    fn only_page_size_supplied_uses_default_number() {
        let page = PageRequest {
            page_number: None,
            page_size: Some(4),
        };
        assert_eq!(page.slice(ten()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn huge_requests_do_not_overflow() {
        assert_eq!(PageRequest::unbounded().slice(ten()), ten());
        assert!(PageRequest::new(u32::MAX, u32::MAX).slice(ten()).is_empty());
    }
}
