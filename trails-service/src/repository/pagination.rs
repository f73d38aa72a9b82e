//! Offset/limit paging over an already ordered sequence

/// Page number used when the caller supplies none.
pub const DEFAULT_PAGE_NUMBER: i64 = 1;

/// Page size used when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: i64 = 1000;

/// Pagination parameters
///
/// Built from 1-indexed page numbers; both inputs are clamped to at least 1
/// and the offset saturates rather than overflowing.
///
/// ```rust
/// use trails_service::repository::Pagination;
///
/// let page3 = Pagination::page(3, 20);
/// assert_eq!(page3.offset, 40);
/// assert_eq!(page3.limit, 20);
///
/// let clamped = Pagination::page(0, -5);
/// assert_eq!((clamped.offset, clamped.limit), (0, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    /// Number of results to skip
    pub offset: u64,
    /// Maximum number of results to return
    pub limit: u64,
}

impl Pagination {
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Pagination for a 1-indexed page of `page_size` items.
    #[must_use]
    pub fn page(page_number: i64, page_size: i64) -> Self {
        let page_number = page_number.max(1).unsigned_abs();
        let page_size = page_size.max(1).unsigned_abs();
        Self {
            offset: (page_number - 1).saturating_mul(page_size),
            limit: page_size,
        }
    }

    /// The elements of `items` inside this page; empty past the end.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(limit).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::page(DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE)
    }
}
