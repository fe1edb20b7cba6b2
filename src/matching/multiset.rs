//! Duplicate-aware list algebra over enzyme names.
//!
//! Matching is one-to-one: an element of `a` consumes at most one equal,
//! not yet consumed element of `b`. A name listed twice in `a` is only fully
//! cancelled if `b` lists it twice as well.

use std::collections::{BTreeSet, HashSet};

/// Split `a` into (matched, unmatched) against `b`, preserving `a`'s order
fn partition<T: PartialEq + Clone>(a: &[T], b: &[T]) -> (Vec<T>, Vec<T>) {
    let mut consumed = vec![false; b.len()];
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for item in a {
        let hit = b
            .iter()
            .enumerate()
            .position(|(j, candidate)| !consumed[j] && candidate == item);
        match hit {
            Some(j) => {
                consumed[j] = true;
                matched.push(item.clone());
            }
            None => unmatched.push(item.clone()),
        }
    }

    (matched, unmatched)
}

/// Elements of `a` left over after one-to-one matching against `b`
#[must_use]
pub fn diff_one_sided<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    partition(a, b).1
}

/// Elements of `a` that find a one-to-one partner in `b`
#[must_use]
pub fn intersect_one_sided<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    partition(a, b).0
}

/// Both one-sided differences, merged, de-duplicated and sorted
#[must_use]
pub fn symmetric_diff_sorted<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let merged: BTreeSet<T> = diff_one_sided(a, b)
        .into_iter()
        .chain(diff_one_sided(b, a))
        .collect();
    merged.into_iter().collect()
}

/// First occurrence of each distinct value, in original order
#[must_use]
pub fn dedupe_stable<T: Eq + std::hash::Hash + Clone>(a: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(a.len());
    a.iter().filter(|item| seen.insert(*item)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_diff_one_sided_is_one_to_one() {
        let a = names(&["test", "seq", "reset", "about"]);
        let b = names(&["about", "union", "about", "seq", "visual"]);
        assert_eq!(diff_one_sided(&a, &b), names(&["test", "reset"]));
        assert_eq!(diff_one_sided(&b, &a), names(&["union", "about", "visual"]));
    }

    #[test]
    fn test_duplicates_only_cancel_as_often_as_matched() {
        let a = names(&["EcoRI", "EcoRI", "TaqI"]);
        let b = names(&["EcoRI"]);
        assert_eq!(diff_one_sided(&a, &b), names(&["EcoRI", "TaqI"]));
        assert_eq!(intersect_one_sided(&a, &b), names(&["EcoRI"]));
    }

    #[test]
    fn test_intersect_and_diff_partition_a() {
        let a = names(&["X", "Y", "X", "Z", "Y", "W"]);
        let b = names(&["Y", "X", "Q", "Y"]);
        let inter = intersect_one_sided(&a, &b);
        let diff = diff_one_sided(&a, &b);
        assert_eq!(inter, names(&["X", "Y", "Y"]));
        assert_eq!(diff, names(&["X", "Z", "W"]));
        assert_eq!(inter.len() + diff.len(), a.len());

        // every element keeps its multiplicity across the two halves
        for name in ["X", "Y", "Z", "W"] {
            let total = a.iter().filter(|n| *n == name).count();
            let split = inter.iter().filter(|n| *n == name).count()
                + diff.iter().filter(|n| *n == name).count();
            assert_eq!(total, split, "{name}");
        }
    }

    #[test]
    fn test_symmetric_diff_sorted_is_commutative() {
        let a = names(&["test", "seq", "reset", "about"]);
        let b = names(&["about", "union", "about", "seq", "visual"]);
        let ab = symmetric_diff_sorted(&a, &b);
        assert_eq!(ab, symmetric_diff_sorted(&b, &a));
        assert_eq!(ab, names(&["about", "reset", "test", "union", "visual"]));
    }

    #[test]
    fn test_symmetric_diff_is_case_sensitive() {
        let a = names(&["bsaI", "BsaI"]);
        let b: Vec<String> = Vec::new();
        assert_eq!(symmetric_diff_sorted(&a, &b), names(&["BsaI", "bsaI"]));
    }

    #[test]
    fn test_empty_inputs() {
        let empty: Vec<String> = Vec::new();
        let a = names(&["A"]);
        assert!(diff_one_sided(&empty, &a).is_empty());
        assert_eq!(diff_one_sided(&a, &empty), a);
        assert!(symmetric_diff_sorted(&empty, &empty).is_empty());
    }

    #[test]
    fn test_dedupe_stable() {
        let a = names(&["about", "union", "about", "seq", "visual", "seq"]);
        assert_eq!(dedupe_stable(&a), names(&["about", "union", "seq", "visual"]));
    }
}
