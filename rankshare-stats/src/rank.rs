//! Rank Index Resolution
//!
//! Turns a sequence length and a percentile fraction into either an exact
//! index or the two indices bracketing the target rank plus the fractional
//! weight between them.

use thiserror::Error;

/// Errors from percentile computation
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PercentileError {
    /// The requested percentile fraction lies outside `[0, 1]`.
    #[error("percentile fraction {0} is outside [0, 1]")]
    InvalidFraction(f64),
}

/// A percentile fraction validated to lie in `[0, 1]`.
///
/// Constructing a `Fraction` is the only place a fraction can be rejected;
/// every operation taking one is infallible. Out-of-range (or non-finite)
/// input fails with [`PercentileError::InvalidFraction`] instead of being
/// silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Fraction(f64);

impl Fraction {
    /// Fraction 0.0 — the minimum element.
    pub const MIN: Fraction = Fraction(0.0);
    /// Fraction 1.0 — the maximum element.
    pub const MAX: Fraction = Fraction(1.0);

    /// Validate `fraction` into a `Fraction`.
    pub fn new(fraction: f64) -> Result<Self, PercentileError> {
        if (0.0..=1.0).contains(&fraction) {
            Ok(Fraction(fraction))
        } else {
            Err(PercentileError::InvalidFraction(fraction))
        }
    }

    /// The validated value.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Resolved position of a percentile within a sorted sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rank {
    /// The percentile lands on a single element.
    Exact(usize),
    /// The percentile falls between two adjacent elements.
    Between {
        /// Index of the element at or before the target rank.
        lower: usize,
        /// Index of the element after the target rank.
        upper: usize,
        /// Weight between the two, usually in `[0, 1)`. Negative for
        /// fractions below the first centered rank, where interpolating
        /// policies extrapolate below the lower element.
        fraction: f64,
    },
}

impl Rank {
    /// The lower (or only) index of this rank.
    pub fn lower(&self) -> usize {
        match *self {
            Rank::Exact(i) => i,
            Rank::Between { lower, .. } => lower,
        }
    }
}

/// Resolve the rank of `fraction` within a sorted sequence of `count`
/// elements.
///
/// Returns `None` for an empty sequence. A one-element sequence resolves to
/// that element for every fraction, and fractions 0 and 1 resolve to the
/// first and last element directly.
///
/// Otherwise the target index is `n * p` rounded to 6 decimal digits
/// (suppressing binary noise such as 0.29 stored as 0.28999…) and shifted
/// down by 0.5 to center it between ranks. A zero fractional part means no
/// interpolation is needed.
///
/// # Examples
///
/// ```
/// use rankshare_stats::{Fraction, Rank, resolve_rank};
///
/// let p = Fraction::new(0.5).unwrap();
/// assert_eq!(
///     resolve_rank(10, p),
///     Some(Rank::Between { lower: 4, upper: 5, fraction: 0.5 })
/// );
/// ```
pub fn resolve_rank(count: usize, fraction: Fraction) -> Option<Rank> {
    let p = fraction.get();
    match count {
        0 => None,
        1 => Some(Rank::Exact(0)),
        n => {
            if p == 0.0 {
                return Some(Rank::Exact(0));
            }
            if p == 1.0 {
                return Some(Rank::Exact(n - 1));
            }
            let raw = (n as f64 * p * 1.0e6).round() * 1.0e-6 - 0.5;
            // Truncation, not floor: raw may dip just below zero for tiny
            // fractions, which must still land on index 0.
            let frac = raw - raw.trunc();
            let index = raw.trunc() as usize;
            if index + 1 >= n {
                Some(Rank::Exact(n - 1))
            } else if frac == 0.0 {
                Some(Rank::Exact(index))
            } else {
                Some(Rank::Between {
                    lower: index,
                    upper: index + 1,
                    fraction: frac,
                })
            }
        }
    }
}
