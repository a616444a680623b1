use nalgebra::Vector2;

/// Euclidean distance between `p` and `q`. NaN/Inf propagate.
#[inline]
pub fn distance(p: Vector2<f64>, q: Vector2<f64>) -> f64 {
    (p - q).norm()
}

/// Twice the signed area of triangle `o, a, b`; positive for a left (CCW) turn.
#[inline]
pub fn cross_product(o: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Shoelace area of a closed polygon; positive for CCW vertex order.
pub fn signed_area(points: &[Vector2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        sum += p.x * q.y - q.x * p.y;
    }
    0.5 * sum
}

/// Sum of consecutive edge lengths of a closed polygon.
pub fn perimeter(points: &[Vector2<f64>]) -> f64 {
    let n = points.len();
    (0..n).map(|i| distance(points[i], points[(i + 1) % n])).sum()
}

/// Points closer than `eps` are the same vertex.
#[inline]
pub fn coincident(p: Vector2<f64>, q: Vector2<f64>, eps: f64) -> bool {
    distance(p, q) <= eps
}

/// First pair `(i, j)` with `i < j` of coincident points, if any.
pub(crate) fn first_duplicate(points: &[Vector2<f64>], eps: f64) -> Option<(usize, usize)> {
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if coincident(points[i], points[j], eps) {
                return Some((i, j));
            }
        }
    }
    None
}

/// True if some three of `points` lie on a common line (within `eps`).
pub(crate) fn has_collinear_triple(points: &[Vector2<f64>], eps: f64) -> bool {
    let n = points.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                if cross_product(points[i], points[j], points[k]).abs() <= eps {
                    return true;
                }
            }
        }
    }
    false
}
