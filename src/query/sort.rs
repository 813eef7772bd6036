//! Optional, stable sort pass.

use std::cmp::Ordering;

use super::Entity;

/// Compare optional values; absent ones go last whatever the direction.
pub fn cmp_opt<T: Ord>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive text order, absent last.
pub fn cmp_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    cmp_opt(a.map(str::to_lowercase), b.map(str::to_lowercase), false)
}

/// Larger first, NaN-safe.
pub fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Sort in place by `key`. Ties keep their relative order.
pub fn sort_records<T: Entity>(records: &mut [&T], key: T::SortKey) {
    records.sort_by(|a, b| (*a).compare_by(*b, key));
}
