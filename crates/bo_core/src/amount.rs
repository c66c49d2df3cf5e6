//! Collection figures in lakhs.
//!
//! `Figure` is `None` when no collection was recorded for a (movie, town, day)
//! tuple. A recorded `Some(0.0)` is a real value and must stay distinct.

use crate::determinism::sum_canonical;

/// Amount in lakhs (1 lakh = 100,000), fractional.
pub type Lakhs = f64;

/// Possibly-absent amount.
pub type Figure = Option<Lakhs>;

/// 100 lakhs = 1 crore.
pub const LAKHS_PER_CRORE: Lakhs = 100.0;

/// Sum of the present figures. An all-absent (or empty) input sums to `0.0`.
///
/// The result does not depend on input order.
pub fn sum_present<I>(figures: I) -> Lakhs
where
    I: IntoIterator<Item = Figure>,
{
    sum_canonical(figures.into_iter().flatten().collect())
}

/// Largest present figure, or `None` when every figure is absent.
pub fn max_present<I>(figures: I) -> Figure
where
    I: IntoIterator<Item = Figure>,
{
    figures
        .into_iter()
        .flatten()
        .fold(None, |acc: Figure, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_skipped_not_zeroed() {
        assert_eq!(sum_present([Some(120.0), None, Some(10.5)]), 130.5);
        assert_eq!(sum_present([None, None]), 0.0);
        assert_eq!(sum_present(std::iter::empty()), 0.0);
    }

    #[test]
    fn max_distinguishes_zero_from_absent() {
        assert_eq!(max_present([None, None]), None);
        assert_eq!(max_present([None, Some(0.0)]), Some(0.0));
        assert_eq!(max_present([Some(3.0), None, Some(7.5), Some(7.5)]), Some(7.5));
    }
}
