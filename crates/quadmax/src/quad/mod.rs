//! Strict convex quadrilaterals in 2D.
//!
//! Purpose
//! - Decide whether four points form a non-degenerate convex quadrilateral and,
//!   if so, hold them in a canonical, consistently oriented order.
//! - Keep every tolerance check on one shared epsilon (`QuadCfg::eps`).
//!
//! Pipeline
//! - duplicate check → monotone-chain hull (`hull`) → strict convexity and
//!   area checks (`validate`) → `ConvexQuad` with cached perimeter.
//!
//! Code cross-refs: `ConvexQuad`, `QuadError`, `hull::order_ccw`, `validate::validate`

mod cfg;
mod hull;
mod types;
mod util;
mod validate;

pub use cfg::{QuadCfg, EPS};
pub use hull::order_ccw;
pub use types::{ConvexQuad, QuadError};
pub use util::{coincident, cross_product, distance, perimeter, signed_area};
pub use validate::{validate, Orientation};

#[cfg(test)]
mod tests;
