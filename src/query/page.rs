//! Pagination of an already filtered (and maybe sorted) list.

use serde::Serialize;
use std::num::NonZeroUsize;

/// One page of results plus the numbers needed to render a pager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage<U> {
    pub items: Vec<U>,
    /// Matches before pagination.
    pub total_count: usize,
    /// 1-indexed page that was requested.
    pub page: usize,
    pub page_size: usize,
    /// Never less than 1, even for an empty list.
    pub total_pages: usize,
}

impl<U> ResultPage<U> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// There are matches, but none on the requested page.
    pub fn is_out_of_range(&self) -> bool {
        self.items.is_empty() && self.total_count > 0
    }

    pub fn has_next(&self) -> bool {
        self.page >= 1 && self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.page <= self.total_pages
    }

    /// 1-indexed position of the first item on this page, for "showing X–Y of Z".
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }
}

/// Slice `filtered` to page `page`.
///
/// Pages outside `1..=total_pages` (including 0) give an empty slice; the
/// caller decides whether to go back to page 1.
pub fn paginate<U: Clone>(filtered: &[U], page: usize, page_size: NonZeroUsize) -> ResultPage<U> {
    let size = page_size.get();
    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(size).max(1);

    let items = match page.checked_sub(1).map(|p| p.saturating_mul(size)) {
        Some(start) if start < total_count => {
            let end = start.saturating_add(size).min(total_count);
            filtered[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    ResultPage {
        items,
        total_count,
        page,
        page_size: size,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_middle_page() {
        let items = [0, 1, 2, 3, 4];
        let page = paginate(&items, 2, size(2));
        assert_eq!(page.items, vec![2, 3]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 5);
        assert!(page.has_next());
        assert!(page.has_previous());
        assert_eq!((page.first_index(), page.last_index()), (3, 4));
    }

    #[test]
    fn test_last_partial_page() {
        let items = [0, 1, 2, 3, 4];
        let page = paginate(&items, 3, size(2));
        assert_eq!(page.items, vec![4]);
        assert!(!page.has_next());
    }

    #[test]
    fn test_empty_input() {
        let items: [u32; 0] = [];
        let page = paginate(&items, 1, size(12));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.is_out_of_range());
    }

    #[test]
    fn test_page_beyond_range() {
        let items = [0, 1, 2, 3, 4];
        let page = paginate(&items, 10, size(2));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 3);
        assert!(page.is_out_of_range());
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_page_zero_is_empty() {
        let items = [0, 1, 2];
        let page = paginate(&items, 0, size(2));
        assert!(page.items.is_empty());
        assert_eq!(page.first_index(), 0);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let items = [0, 1, 2];
        let page = paginate(&items, usize::MAX, size(usize::MAX));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_exact_multiple() {
        let items = [0, 1, 2, 3];
        assert_eq!(paginate(&items, 1, size(2)).total_pages, 2);
        assert_eq!(paginate(&items, 1, size(4)).total_pages, 1);
    }
}
