//! Determinism utilities: stable ordering & order-independent reduction.
//!
//! This module is **I/O-free**. It provides:
//! - A total, descending order on amounts (ties compare `Equal`, so stable
//!   sorts keep feed order)
//! - First-occurrence de-duplication
//! - An order-independent sum for floating-point figures

use core::cmp::Ordering;

use std::collections::BTreeSet;

use crate::amount::Lakhs;

/* -------------------------------------------------------------------------- */
/*                               Stable Ordering                              */
/* -------------------------------------------------------------------------- */

/// Descending by amount. Equal amounts are `Equal`.
#[inline]
pub fn cmp_amount_desc(a: Lakhs, b: Lakhs) -> Ordering {
    b.total_cmp(&a)
}

/// Keep the first occurrence of each item, preserving input order.
pub fn dedup_first<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    let mut seen: BTreeSet<&T> = BTreeSet::new();
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        if seen.insert(it) {
            out.push(it.clone());
        }
    }
    out
}

/* -------------------------------------------------------------------------- */
/*                         Deterministic (order-free) reduce                   */
/* -------------------------------------------------------------------------- */

/// Sum after sorting ascending, so the same multiset of values always yields
/// the same bits regardless of the order it arrived in.
pub fn sum_canonical(mut values: Vec<Lakhs>) -> Lakhs {
    values.sort_by(|a, b| a.total_cmp(b));
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

/* ---------------------------------- Tests --------------------------------- */
