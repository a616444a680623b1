//! Tolerance defaults for quadrilateral checks.
//!
//! Policy
//! - One epsilon for duplicates, collinearity, hull turns and area. Callers that
//!   need a different scale pass a `QuadCfg`; nothing reads an ad-hoc literal.

/// Shared tolerance for all zero/equality tests on coordinates.
pub const EPS: f64 = 1e-9;

/// Quadrilateral configuration (tolerance).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadCfg {
    pub eps: f64,
}

impl QuadCfg {
    /// Panics in debug builds unless `eps` is finite and positive; use
    /// `checked` for untrusted values.
    #[inline]
    pub fn with_eps(eps: f64) -> Self {
        debug_assert!(
            eps.is_finite() && eps > 0.0,
            "eps must be finite and > 0, got {eps}"
        );
        Self { eps }
    }

    /// `None` for `eps <= 0` or non-finite: with such a tolerance no pair is
    /// ever a duplicate and no turn is ever collinear.
    #[inline]
    pub fn checked(eps: f64) -> Option<Self> {
        (eps.is_finite() && eps > 0.0).then_some(Self { eps })
    }
}

impl Default for QuadCfg {
    fn default() -> Self {
        Self { eps: EPS }
    }
}
