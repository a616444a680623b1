//! `ConvexQuad` and its rejection taxonomy.
//!
//! - `ConvexQuad`: four vertices in a fixed traversal order plus the cached
//!   perimeter; only constructible through the checks in `hull`/`validate`.
//! - `QuadError`: why a candidate was rejected. Every variant is local to one
//!   candidate; none is fatal to a batch.

use std::fmt;

use nalgebra::Vector2;

use super::cfg::QuadCfg;
use super::hull::order_ccw;
use super::util::{distance, first_duplicate, has_collinear_triple, perimeter, signed_area};
use super::validate::{validate, Orientation};

/// Reasons a candidate is not a strict convex quadrilateral.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuadError {
    /// Input did not carry exactly 4 points.
    WrongVertexCount { got: usize },
    /// Input points `first` and `second` coincide within eps.
    DuplicateVertex { first: usize, second: usize },
    /// Three vertices lie on one line within eps.
    CollinearVertices,
    /// Mixed turn directions, or one point inside the triangle of the others.
    NonConvex,
    /// Shoelace area within eps of zero.
    DegenerateArea { area: f64 },
}

impl QuadError {
    /// Short stable tag for reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            QuadError::WrongVertexCount { .. } => "wrong_vertex_count",
            QuadError::DuplicateVertex { .. } => "duplicate_vertex",
            QuadError::CollinearVertices => "collinear_vertices",
            QuadError::NonConvex => "non_convex",
            QuadError::DegenerateArea { .. } => "degenerate_area",
        }
    }
}

impl fmt::Display for QuadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadError::WrongVertexCount { got } => {
                write!(f, "expected 4 vertices, got {got}")
            }
            QuadError::DuplicateVertex { first, second } => {
                write!(f, "vertices {first} and {second} coincide")
            }
            QuadError::CollinearVertices => write!(f, "three vertices are collinear"),
            QuadError::NonConvex => write!(f, "vertices do not form a convex quadrilateral"),
            QuadError::DegenerateArea { area } => {
                write!(f, "quadrilateral area {area:e} is degenerate")
            }
        }
    }
}

impl std::error::Error for QuadError {}

/// Strictly convex quadrilateral with consistent orientation.
///
/// Invariants:
/// - 4 pairwise-distinct vertices (no pair within eps).
/// - All consecutive turns strictly the same sign, `|cross| > eps`.
/// - `|area| > eps`; `perimeter` is computed once here.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexQuad {
    vertices: [Vector2<f64>; 4],
    orientation: Orientation,
    perimeter: f64,
}

impl ConvexQuad {
    /// Build from 4 unordered points with the default tolerance.
    pub fn new(points: [Vector2<f64>; 4]) -> Result<Self, QuadError> {
        Self::with_cfg(points, QuadCfg::default())
    }

    /// Build from 4 unordered points. Vertices come back CCW, starting at the
    /// smallest `(x, y)`.
    pub fn with_cfg(points: [Vector2<f64>; 4], cfg: QuadCfg) -> Result<Self, QuadError> {
        if let Some((first, second)) = first_duplicate(&points, cfg.eps) {
            return Err(QuadError::DuplicateVertex { first, second });
        }
        let hull = order_ccw(&points, cfg.eps);
        let ordered: [Vector2<f64>; 4] = match hull.try_into() {
            Ok(v) => v,
            Err(_) if has_collinear_triple(&points, cfg.eps) => {
                return Err(QuadError::CollinearVertices)
            }
            Err(_) => return Err(QuadError::NonConvex),
        };
        Self::from_ordered_with_cfg(ordered, cfg)
    }

    /// Build from a slice; anything but 4 points is `WrongVertexCount`.
    pub fn from_points(points: &[Vector2<f64>]) -> Result<Self, QuadError> {
        Self::from_points_with_cfg(points, QuadCfg::default())
    }

    pub fn from_points_with_cfg(points: &[Vector2<f64>], cfg: QuadCfg) -> Result<Self, QuadError> {
        let arr: [Vector2<f64>; 4] = points
            .try_into()
            .map_err(|_| QuadError::WrongVertexCount { got: points.len() })?;
        Self::with_cfg(arr, cfg)
    }

    /// Accept vertices already in traversal order; keeps the caller's
    /// orientation (CW or CCW) and starting vertex.
    pub fn from_ordered(vertices: [Vector2<f64>; 4]) -> Result<Self, QuadError> {
        Self::from_ordered_with_cfg(vertices, QuadCfg::default())
    }

    pub fn from_ordered_with_cfg(
        vertices: [Vector2<f64>; 4],
        cfg: QuadCfg,
    ) -> Result<Self, QuadError> {
        let orientation = validate(&vertices, cfg)?;
        Ok(Self {
            vertices,
            orientation,
            perimeter: perimeter(&vertices),
        })
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>; 4] {
        &self.vertices
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn perimeter(&self) -> f64 {
        self.perimeter
    }

    /// Unsigned shoelace area.
    pub fn area(&self) -> f64 {
        signed_area(&self.vertices).abs()
    }

    /// Edge lengths `|V0V1|, |V1V2|, |V2V3|, |V3V0|`.
    pub fn edge_lengths(&self) -> [f64; 4] {
        let v = &self.vertices;
        [
            distance(v[0], v[1]),
            distance(v[1], v[2]),
            distance(v[2], v[3]),
            distance(v[3], v[0]),
        ]
    }
}

impl fmt::Display for ConvexQuad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, (label, v)) in ["A", "B", "C", "D"].iter().zip(&self.vertices).enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{label}({}, {})", v.x, v.y)?;
        }
        Ok(())
    }
}
