//! Reproducible random quadrilateral candidates (replay tokens).
//!
//! Purpose
//! - Deterministic inputs for property tests, benchmarks and the CLI `sample`
//!   command. The same `ReplayToken` always yields the same points.
//!
//! Model
//! - Convex draws: one angle per quadrant with bounded jitter, placed on an
//!   ellipse with jittered semi-axes and a random tilt, then translated.
//!   Points on an ellipse are always in convex position.
//! - Raw candidates: with probability `invalid_frac` the draw is corrupted
//!   (duplicate, collinear, interior point or bow-tie order); the points are
//!   then shuffled so callers cannot rely on input order.

use nalgebra::{Rotation2, Vector2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::quad::ConvexQuad;

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SampleCfg {
    /// Base circumradius.
    pub radius: f64,
    /// Semi-axis jitter (relative). Axes = `radius * (1 + u)`, `u∈[-axis_jitter, axis_jitter]`.
    pub axis_jitter: f64,
    /// Angular jitter as a fraction of the quadrant width. Clamped to [0, 0.45].
    pub angle_jitter_frac: f64,
    /// Centers are drawn uniformly from `[-spread, spread]²`.
    pub spread: f64,
    /// Probability that `draw_candidate` returns a corrupted set. Clamped to [0, 1].
    pub invalid_frac: f64,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            radius: 5.0,
            axis_jitter: 0.5,
            angle_jitter_frac: 0.4,
            spread: 20.0,
            invalid_frac: 0.25,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn convex_points<R: Rng>(cfg: SampleCfg, rng: &mut R) -> [Vector2<f64>; 4] {
    let quarter = std::f64::consts::FRAC_PI_2;
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.45);
    let xj = cfg.axis_jitter.clamp(0.0, 0.9);
    let r0 = cfg.radius.max(1e-6);
    let spread = cfg.spread.max(0.0);
    let mut axis = || (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * xj) * r0;
    let (rx, ry) = (axis(), axis());
    let tilt = Rotation2::new(rng.gen::<f64>() * std::f64::consts::PI);
    let center = Vector2::new(
        rng.gen_range(-spread..=spread),
        rng.gen_range(-spread..=spread),
    );
    let mut out = [Vector2::zeros(); 4];
    for (k, p) in out.iter_mut().enumerate() {
        let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * quarter;
        let th = (k as f64 + 0.5) * quarter + jitter;
        *p = center + tilt * Vector2::new(rx * th.cos(), ry * th.sin());
    }
    out
}

/// Draw a convex quadrilateral. `None` only if the draw lands within
/// tolerance of a degenerate shape (extreme `cfg` values).
pub fn draw_convex_quad(cfg: SampleCfg, tok: ReplayToken) -> Option<ConvexQuad> {
    let mut rng = tok.to_std_rng();
    ConvexQuad::new(convex_points(cfg, &mut rng)).ok()
}

/// Draw raw candidate points (possibly invalid), shuffled.
pub fn draw_candidate(cfg: SampleCfg, tok: ReplayToken) -> [Vector2<f64>; 4] {
    let mut rng = tok.to_std_rng();
    let mut pts = convex_points(cfg, &mut rng);
    if rng.gen::<f64>() < cfg.invalid_frac.clamp(0.0, 1.0) {
        match rng.gen_range(0..4) {
            // Duplicate.
            0 => pts[3] = pts[1],
            // Midpoint of an edge.
            1 => pts[3] = (pts[0] + pts[1]) * 0.5,
            // Centroid of a triangle.
            2 => pts[3] = (pts[0] + pts[1] + pts[2]) / 3.0,
            // Bow-tie order; the hull recovers it.
            _ => pts.swap(1, 2),
        }
    }
    pts.shuffle(&mut rng);
    pts
}
