//! Roster query engine.
//!
//! Pure functions that turn a fully loaded record list plus a
//! [`FilterState`] into the visible page and its summary counts:
//! filter, then an optional stable sort, then pagination. Aggregates are
//! computed over the unfiltered input.
//!
//! The engine is generic over [`Entity`], which tells it which fields of a
//! record are searchable, which one is the category, which boolean is the
//! status flag and how to order two records.

pub mod aggregate;
pub mod entities;
pub mod filter;
pub mod page;
pub mod sort;

pub use aggregate::{aggregate_counts, percent, shares, Aggregates};
pub use entities::{join_injuries, InjuryRow};
pub use filter::{filter_records, FilterState};
pub use page::{paginate, ResultPage};
pub use sort::sort_records;

use serde::Serialize;
use std::cmp::Ordering;
use std::num::NonZeroUsize;

#[cfg(test)]
mod tests;

/// Per-record-type configuration of the query engine.
pub trait Entity {
    /// Sort orders this record type supports.
    type SortKey: Copy + PartialEq;

    /// Fields the free-text search looks at. `None` entries never match.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Value the category filter compares against, exactly.
    fn category(&self) -> Option<&str>;

    /// Boolean the status filter compares against. Types without one ignore
    /// the status filter.
    fn status_flag(&self) -> Option<bool> {
        None
    }

    fn compare_by(&self, other: &Self, key: Self::SortKey) -> Ordering;

    /// Category values that always get a bucket, even at zero.
    fn known_categories() -> &'static [&'static str] {
        &[]
    }

    /// Bucket labels for the status flag being true and false.
    fn status_labels() -> Option<(&'static str, &'static str)> {
        None
    }

    fn extra_bucket_labels() -> &'static [&'static str] {
        &[]
    }

    /// Extra buckets this record counts toward.
    fn extra_buckets(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// Visible page plus aggregates over everything that was loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<'a, T> {
    #[serde(flatten)]
    pub page: ResultPage<&'a T>,
    pub aggregates: Aggregates,
}

/// Filter, sort and paginate `records`, and count them.
///
/// # Examples
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use roster_dash::api::PlayerRecord;
/// use roster_dash::cli::types::{PlayerId, PlayerSort};
/// use roster_dash::query::{run_query, FilterState};
///
/// let players = vec![
///     PlayerRecord::new(PlayerId::new(1), "Messi"),
///     PlayerRecord::new(PlayerId::new(2), "Mbappe"),
/// ];
/// let filters = FilterState::new().with_sort(Some(PlayerSort::Name));
/// let result = run_query(&players, &filters, NonZeroUsize::new(12).unwrap());
///
/// assert_eq!(result.page.items[0].display_name.as_deref(), Some("Mbappe"));
/// assert_eq!(result.aggregates["total"], 2);
/// ```
pub fn run_query<'a, T: Entity>(
    records: &'a [T],
    filters: &FilterState<T::SortKey>,
    page_size: NonZeroUsize,
) -> QueryResult<'a, T> {
    let mut filtered = filter_records(records, filters);
    if let Some(key) = filters.sort() {
        sort_records(&mut filtered, key);
    }

    QueryResult {
        page: paginate(&filtered, filters.page(), page_size),
        aggregates: aggregate_counts(records),
    }
}
