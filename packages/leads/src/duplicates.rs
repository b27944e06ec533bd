//! Duplicate-frequency counting and de-duplication.
//!
//! Two rows are the same lead when their dedupe keys match. The key is
//! built by the caller (cleaned address plus configured columns) and
//! compared case-insensitively.

use std::collections::{BTreeMap, BTreeSet};

/// Builds a dedupe key from its parts: trimmed, lowercased, `|`-joined.
#[must_use]
pub fn dedupe_key<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(|p| p.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join("|")
}

/// Counts how many times each key occurs.
#[must_use]
pub fn count_duplicates<S: AsRef<str>>(keys: &[S]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key.as_ref().to_string()).or_default() += 1;
    }
    counts
}

/// Indices of the first occurrence of each key, in input order.
#[must_use]
pub fn first_occurrences<S: AsRef<str>>(keys: &[S]) -> Vec<usize> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut firsts = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        if seen.insert(S::as_ref(key)) {
            firsts.push(i);
        }
    }
    firsts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_case_insensitive_keys() {
        assert_eq!(
            dedupe_key(["1 North Main Street", " Chicago ", "IL"]),
            "1 north main street|chicago|il"
        );
        assert_eq!(
            dedupe_key(["1 NORTH MAIN STREET", "chicago", "il"]),
            dedupe_key(["1 North Main Street", "Chicago", "IL"])
        );
    }

    #[test]
    fn counts_keys() {
        let counts = count_duplicates(&["a", "b", "a", "a"]);
        assert_eq!(counts["a"], 3);
        assert_eq!(counts["b"], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn keeps_first_occurrence_order() {
        assert_eq!(first_occurrences(&["b", "a", "b", "c", "a"]), vec![0, 1, 3]);
    }

    #[test]
    fn empty_input() {
        let keys: [&str; 0] = [];
        assert!(count_duplicates(&keys).is_empty());
        assert!(first_occurrences(&keys).is_empty());
    }
}
