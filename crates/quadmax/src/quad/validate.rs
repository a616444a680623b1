//! Strict convexity check for an ordered vertex sequence.
//!
//! Pure decision procedure: no state beyond its inputs. Order of checks
//! - duplicates (would otherwise show up as zero crosses),
//! - collinear consecutive triples (`|cross| <= eps`),
//! - mixed turn signs (concave or self-intersecting),
//! - shoelace area as a final degeneracy guard.

use nalgebra::Vector2;

use super::cfg::QuadCfg;
use super::types::QuadError;
use super::util::{first_duplicate, signed_area};

/// Traversal direction of an accepted quadrilateral.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
}

impl Orientation {
    #[inline]
    pub fn is_ccw(self) -> bool {
        matches!(self, Orientation::CounterClockwise)
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Orientation::CounterClockwise => Orientation::Clockwise,
            Orientation::Clockwise => Orientation::CounterClockwise,
        }
    }
}

/// Confirm `v` (in traversal order) is a strictly convex quadrilateral.
pub fn validate(v: &[Vector2<f64>; 4], cfg: QuadCfg) -> Result<Orientation, QuadError> {
    let eps = cfg.eps;
    if let Some((first, second)) = first_duplicate(v, eps) {
        return Err(QuadError::DuplicateVertex { first, second });
    }

    let mut positive = 0usize;
    let mut negative = 0usize;
    for i in 0..4 {
        let e1 = v[(i + 1) % 4] - v[i];
        let e2 = v[(i + 2) % 4] - v[(i + 1) % 4];
        let turn = e1.x * e2.y - e1.y * e2.x;
        if turn.abs() <= eps {
            return Err(QuadError::CollinearVertices);
        }
        if turn > 0.0 {
            positive += 1;
        } else {
            negative += 1;
        }
    }
    if positive != 0 && negative != 0 {
        return Err(QuadError::NonConvex);
    }

    let area = signed_area(v);
    if area.abs() <= eps {
        return Err(QuadError::DegenerateArea { area: area.abs() });
    }

    Ok(if positive == 4 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    })
}
