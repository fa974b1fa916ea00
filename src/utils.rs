use crate::schema::{TOTAL_PREFIX, TOTAL_PREFIX_WIDTH};

/// Rounds to the nearest whole amount, ties to even.
pub fn round_amount(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Section name of a totals label: the "total" prefix and its separator removed.
/// Labels without the prefix are returned unchanged.
pub fn strip_total_prefix(label: &str) -> &str {
    if !label.starts_with(TOTAL_PREFIX) {
        return label;
    }

    match label.char_indices().nth(TOTAL_PREFIX_WIDTH) {
        Some((offset, _)) => &label[offset..],
        None => "",
    }
}

/// Returns the first item with the greatest key. Later items only win on a strictly greater key.
pub fn first_max_by_key<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Option<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut best: Option<(K, T)> = None;

    for item in items {
        let candidate = key(&item);
        let replace = match &best {
            Some((best_key, _)) => candidate > *best_key,
            None => true,
        };
        if replace {
            best = Some((candidate, item));
        }
    }

    best.map(|(_, item)| item)
}
