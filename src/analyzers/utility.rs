use std::collections::BTreeMap;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Counts occurrences of each value, keyed in ascending order.
pub fn counts<K, I>(values: I) -> BTreeMap<K, usize>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
}

/// Returns the most frequent value and its count.
///
/// Ties go to the smallest value, so the answer never depends on input order.
/// Returns `None` for empty input.
pub fn mode<K, I>(values: I) -> Option<(K, usize)>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut best: Option<(K, usize)> = None;
    for (value, count) in counts(values) {
        // ascending keys: only a strictly higher count replaces the leader
        if best.as_ref().is_none_or(|(_, c)| count > *c) {
            best = Some((value, count));
        }
    }
    best
}

/// Occurrence counts ordered by count descending, then value ascending.
pub fn value_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut out: Vec<_> = counts(values).into_iter().collect();
    // stable sort keeps ascending keys within equal counts
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}
