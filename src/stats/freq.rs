//! Shared frequency helpers: stable mode and ordered count tables.

use std::collections::HashMap;
use std::hash::Hash;

/// Counts every distinct value and returns `(value, count)` pairs in
/// descending count order. Ties keep first-appearance order, which is
/// what makes the mode stable.
pub fn frequency_table<T, I>(values: I) -> Vec<(T, u64)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, u64> = HashMap::new();
    let mut order: Vec<T> = Vec::new();

    for value in values {
        let count = counts.entry(value.clone()).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut table: Vec<(T, u64)> = order
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            (value, count)
        })
        .collect();

    // sort_by is stable, so equal counts stay in first-appearance order
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

/// The most frequent value, ties broken by first occurrence.
/// `None` for empty input.
pub fn stable_mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    frequency_table(values).into_iter().next().map(|(v, _)| v)
}
