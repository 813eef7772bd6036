//! Filter state and the filter pass of the query engine.

use serde::Serialize;

use super::Entity;
use crate::cli::types::CategoryFilter;

/// Snapshot of what the user selected in a list view.
///
/// Changing the search, category, status or sort moves the view back to page
/// 1; changing the page leaves everything else alone.
///
/// # Examples
///
/// ```rust
/// use roster_dash::query::FilterState;
/// use roster_dash::cli::types::PlayerSort;
///
/// let mut filters: FilterState<PlayerSort> = FilterState::new();
/// filters.set_page(3);
/// filters.set_search("mes");
/// assert_eq!(filters.page(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState<K> {
    search: String,
    category: CategoryFilter,
    status: Option<bool>,
    sort: Option<K>,
    page: usize,
}

impl<K> Default for FilterState<K> {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            status: None,
            sort: None,
            page: 1,
        }
    }
}

impl<K: Copy + PartialEq> FilterState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.set_category(category);
        self
    }

    pub fn with_status(mut self, status: Option<bool>) -> Self {
        self.set_status(status);
        self
    }

    pub fn with_sort(mut self, sort: Option<K>) -> Self {
        self.set_sort(sort);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        if category != self.category {
            self.category = category;
            self.page = 1;
        }
    }

    pub fn set_status(&mut self, status: Option<bool>) {
        if status != self.status {
            self.status = status;
            self.page = 1;
        }
    }

    pub fn set_sort(&mut self, sort: Option<K>) {
        if sort != self.sort {
            self.sort = sort;
            self.page = 1;
        }
    }

    /// Not clamped: an out-of-range page yields an empty slice.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn status(&self) -> Option<bool> {
        self.status
    }

    pub fn sort(&self) -> Option<K> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// True when no predicate constrains the records.
    pub fn is_identity(&self) -> bool {
        self.search.is_empty() && self.category.is_all() && self.status.is_none()
    }
}

/// Case-insensitive substring match over the entity's searchable fields.
///
/// `needle` must already be lowercased; an empty needle matches everything.
fn matches_search<T: Entity>(record: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

fn matches_status<T: Entity>(record: &T, wanted: Option<bool>) -> bool {
    match (wanted, record.status_flag()) {
        (Some(wanted), Some(flag)) => wanted == flag,
        // no constraint, or the entity has no status flag
        _ => true,
    }
}

/// Records passing search, category and status predicates, in input order.
///
/// Never touches `records`; the result borrows from it.
pub fn filter_records<'a, T: Entity>(
    records: &'a [T],
    filters: &FilterState<T::SortKey>,
) -> Vec<&'a T> {
    let needle = filters.search().to_lowercase();
    let category = filters.category();
    let status = filters.status();

    records
        .iter()
        .filter(|record| {
            matches_search(*record, &needle)
                && category.matches(record.category())
                && matches_status(*record, status)
        })
        .collect()
}
