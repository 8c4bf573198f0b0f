//! Percentile Extraction
//!
//! Applies rank resolution to an already-sorted sequence and resolves
//! bracketed ranks through an interpolation policy. When the two bracketing
//! elements are value-equal the policy is skipped entirely, so coincident
//! ranks never require arithmetic on the element type.

use crate::interpolate::Policy;
use crate::rank::{Fraction, Rank, resolve_rank};

/// Compute the percentile at `fraction` of a sorted slice.
///
/// Returns `None` for an empty slice. The slice must already be ordered by
/// whatever comparison the caller considers rank order.
///
/// # Examples
///
/// ```
/// use rankshare_stats::{Fraction, Policy, percentile_of_sorted};
///
/// let values: Vec<f64> = (0..10).map(|i| (i * 10) as f64).collect();
/// let median = Fraction::new(0.5).unwrap();
/// assert_eq!(
///     percentile_of_sorted(&values, median, &Policy::linear()),
///     Some(45.0)
/// );
/// ```
pub fn percentile_of_sorted<T>(sorted: &[T], fraction: Fraction, policy: &Policy<T>) -> Option<T>
where
    T: Clone + PartialEq,
{
    match resolve_rank(sorted.len(), fraction)? {
        Rank::Exact(index) => Some(sorted[index].clone()),
        Rank::Between {
            lower,
            upper,
            fraction,
        } => {
            let t0 = &sorted[lower];
            let t1 = &sorted[upper];
            if t0 == t1 {
                Some(t0.clone())
            } else {
                Some(policy.resolve(t0, t1, fraction))
            }
        }
    }
}

/// Build a finishing function computing the percentile at `fraction` of a
/// sorted sequence.
///
/// The fraction is validated before this is called ([`Fraction::new`]), so
/// the returned function is infallible; an empty sequence yields `None`.
pub fn percentile<T>(
    fraction: Fraction,
    policy: Policy<T>,
) -> impl Fn(&Vec<T>) -> Option<T> + Send + Sync + Clone
where
    T: Clone + PartialEq,
{
    move |sorted| percentile_of_sorted(sorted, fraction, &policy)
}
