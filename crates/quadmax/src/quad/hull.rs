use std::cmp::Ordering;

use nalgebra::Vector2;

use super::util::cross_product;

/// Andrew's monotone chain convex hull, CCW, starting at the smallest `(x, y)`.
///
/// Points whose turn is not strictly left (`cross <= eps`) are dropped, so
/// collinear and interior points never appear. Callers reject duplicates first.
pub fn order_ccw(points: &[Vector2<f64>], eps: f64) -> Vec<Vector2<f64>> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| match a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal),
        o => o,
    });
    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2
            && cross_product(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= eps
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2
            && cross_product(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= eps
        {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}
