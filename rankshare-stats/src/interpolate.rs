//! Interpolation Policies
//!
//! Strategies for resolving a final value from the two elements bracketing a
//! fractional rank. Floor, ceiling and half-up pick one of the two elements
//! and work for any cloneable type; linear interpolation additionally needs
//! arithmetic and is restricted to [`Lerp`] types.

use std::fmt;
use std::sync::Arc;

/// Element types supporting linear interpolation between two ranks.
pub trait Lerp {
    /// Interpolate between `t0` and `t1` at `fraction`.
    fn lerp(t0: &Self, t1: &Self, fraction: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(t0: &Self, t1: &Self, fraction: f64) -> Self {
        // Algebraically t0 + (t1 - t0) * fraction, but this exact form is
        // what fixed expected results were computed with.
        t0 - t0 * fraction + t1 * fraction
    }
}

impl Lerp for f32 {
    fn lerp(t0: &Self, t1: &Self, fraction: f64) -> Self {
        let f = fraction as f32;
        t0 - t0 * f + t1 * f
    }
}

/// A pure strategy resolving `(t0, t1, fraction)` to a final value.
///
/// Policies are cheap to clone and carry no state; custom policies may be
/// supplied through [`Policy::custom`].
pub struct Policy<T> {
    name: &'static str,
    f: Arc<dyn Fn(&T, &T, f64) -> T + Send + Sync>,
}

impl<T> Clone for Policy<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            f: Arc::clone(&self.f),
        }
    }
}

impl<T> fmt::Debug for Policy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Policy").field(&self.name).finish()
    }
}

impl<T: Clone + 'static> Policy<T> {
    /// Always the lower bracketing element.
    pub fn floor() -> Self {
        Self {
            name: "floor",
            f: Arc::new(|t0, _, _| t0.clone()),
        }
    }

    /// Always the upper bracketing element.
    pub fn ceiling() -> Self {
        Self {
            name: "ceiling",
            f: Arc::new(|_, t1, _| t1.clone()),
        }
    }

    /// The lower element for fractions below 0.5, the upper otherwise.
    pub fn half_up() -> Self {
        Self {
            name: "half-up",
            f: Arc::new(|t0, t1, f| if f < 0.5 { t0.clone() } else { t1.clone() }),
        }
    }
}

impl<T: Lerp + 'static> Policy<T> {
    /// Linear interpolation between the two bracketing elements.
    pub fn linear() -> Self {
        Self {
            name: "linear",
            f: Arc::new(|t0, t1, f| Lerp::lerp(t0, t1, f)),
        }
    }
}

impl<T> Policy<T> {
    /// A caller-supplied resolution strategy.
    pub fn custom(f: impl Fn(&T, &T, f64) -> T + Send + Sync + 'static) -> Self {
        Self {
            name: "custom",
            f: Arc::new(f),
        }
    }

    /// Resolve a value from the two bracketing elements and the weight
    /// between them.
    pub fn resolve(&self, t0: &T, t1: &T, fraction: f64) -> T {
        (self.f)(t0, t1, fraction)
    }
}
