//! Convex quadrilateral validation and max-perimeter selection.
//!
//! Layout
//! - `quad`: point utilities, hull orderer, validator and the `ConvexQuad` type.
//! - `select`: winner selection over a batch of candidates.
//! - `rand`: reproducible candidate sampler (tests, benches, CLI `sample`).
//!
//! API Policy
//! - The CLI crate is the only downstream consumer. Prefer clear types over
//!   compatibility; breaking changes are fine when they improve the design.

pub mod quad;
pub mod rand;
pub mod select;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;
pub use quad::{ConvexQuad, Orientation, QuadCfg, QuadError, EPS};
pub use select::{max_perimeter, Selection, Summary};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::quad::{
        cross_product, distance, perimeter, signed_area, validate, ConvexQuad, Orientation,
        QuadCfg, QuadError, EPS,
    };
    pub use crate::rand::{draw_candidate, draw_convex_quad, ReplayToken, SampleCfg};
    pub use crate::select::{max_perimeter, Selection, Summary};
    pub use nalgebra::Vector2 as Vec2;
}
