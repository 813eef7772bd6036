//! Summary counts for the stat cards above each list.

use std::collections::BTreeMap;

use super::Entity;

/// Bucket label to count.
pub type Aggregates = BTreeMap<String, usize>;

pub const TOTAL: &str = "total";

/// Bucket for records without a category value.
pub const UNKNOWN: &str = "unknown";

fn bump(counts: &mut Aggregates, label: &str) {
    *counts.entry(label.to_string()).or_insert(0) += 1;
}

/// Count `records` per category, per status flag and per entity-specific
/// bucket. Always computed over the full input, never the filtered view.
///
/// Known categories and status labels are present with a zero count even when
/// no record falls into them.
pub fn aggregate_counts<T: Entity>(records: &[T]) -> Aggregates {
    let mut counts = Aggregates::new();
    counts.insert(TOTAL.to_string(), records.len());

    let seeded = T::known_categories()
        .iter()
        .chain(T::extra_bucket_labels())
        .copied()
        .chain(T::status_labels().into_iter().flat_map(|(on, off)| [on, off]));
    for label in seeded {
        counts.insert(label.to_string(), 0);
    }

    for record in records {
        bump(&mut counts, record.category().unwrap_or(UNKNOWN));

        if let (Some(flag), Some((on, off))) = (record.status_flag(), T::status_labels()) {
            bump(&mut counts, if flag { on } else { off });
        }

        for label in record.extra_buckets() {
            bump(&mut counts, label);
        }
    }

    counts
}

/// `part` as a percentage of `whole`; 0 when `whole` is 0.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Each bucket's percentage of the sum of all buckets.
pub fn shares(distribution: &BTreeMap<String, u64>) -> BTreeMap<String, f64> {
    let whole: u64 = distribution.values().sum();
    distribution
        .iter()
        .map(|(label, count)| (label.clone(), percent(*count, whole)))
        .collect()
}
