use super::*;
use nalgebra::{vector, Vector2};
use proptest::prelude::*;

fn quad(pts: [(f64, f64); 4]) -> [Vector2<f64>; 4] {
    pts.map(|(x, y)| Vector2::new(x, y))
}

#[test]
fn square_side_two_has_perimeter_eight() {
    let q = ConvexQuad::new(quad([(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)])).unwrap();
    assert!((q.perimeter() - 8.0).abs() < 1e-6);
    assert!((q.area() - 4.0).abs() < 1e-12);
    assert_eq!(q.orientation(), Orientation::CounterClockwise);
}

#[test]
fn three_points_on_axis_are_collinear() {
    let r = ConvexQuad::new(quad([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 1.0)]));
    assert_eq!(r, Err(QuadError::CollinearVertices));
}

#[test]
fn repeated_point_is_duplicate() {
    let r = ConvexQuad::new(quad([(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 1.0)]));
    assert_eq!(
        r,
        Err(QuadError::DuplicateVertex {
            first: 1,
            second: 2
        })
    );
}

#[test]
fn point_inside_triangle_is_non_convex() {
    let r = ConvexQuad::new(quad([(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 1.0)]));
    assert_eq!(r, Err(QuadError::NonConvex));
}

#[test]
fn crossed_input_order_is_reordered() {
    // Bow-tie order as given; the hull recovers the convex traversal.
    let q = ConvexQuad::new(quad([(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)])).unwrap();
    assert_eq!(
        q.vertices(),
        &[
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0]
        ]
    );
    // The same order handed to the validator directly is rejected.
    assert_eq!(
        ConvexQuad::from_ordered(quad([(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)])),
        Err(QuadError::NonConvex)
    );
}

#[test]
fn from_ordered_keeps_clockwise() {
    let q = ConvexQuad::from_ordered(quad([(0.0, 0.0), (0.0, 3.0), (4.0, 3.0), (4.0, 0.0)]))
        .unwrap();
    assert_eq!(q.orientation(), Orientation::Clockwise);
    assert_eq!(q.vertices()[1], vector![0.0, 3.0]);
    assert_eq!(q.edge_lengths(), [3.0, 4.0, 3.0, 4.0]);
    assert!((q.perimeter() - 14.0).abs() < 1e-12);
}

#[test]
fn slice_length_is_checked() {
    let three = [vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]];
    assert_eq!(
        ConvexQuad::from_points(&three),
        Err(QuadError::WrongVertexCount { got: 3 })
    );
    let five = [vector![0.0, 0.0]; 5];
    assert_eq!(
        ConvexQuad::from_points(&five),
        Err(QuadError::WrongVertexCount { got: 5 })
    );
    let four = [
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 1.0],
    ];
    assert!(ConvexQuad::from_points(&four).is_ok());
}

#[test]
fn duplicate_threshold_sits_at_eps() {
    let base = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    let mut near = quad(base);
    near[2] = near[1] + vector![0.0, 1e-10];
    assert!(matches!(
        validate(&near, QuadCfg::default()),
        Err(QuadError::DuplicateVertex { .. })
    ));
    assert!(coincident(near[1], near[2], EPS));

    let mut apart = quad(base);
    apart[2] = apart[1] + vector![1e-8, 0.0];
    assert!(!coincident(apart[1], apart[2], EPS));
    assert!(!matches!(
        ConvexQuad::new(apart),
        Err(QuadError::DuplicateVertex { .. })
    ));
}

#[test]
fn display_lists_labelled_vertices() {
    let q = ConvexQuad::new(quad([(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)])).unwrap();
    assert_eq!(q.to_string(), "A(0, 0), B(2, 0), C(2, 2), D(0, 2)");
}

#[test]
fn error_messages_and_kinds() {
    assert_eq!(
        QuadError::WrongVertexCount { got: 3 }.to_string(),
        "expected 4 vertices, got 3"
    );
    assert_eq!(QuadError::NonConvex.kind(), "non_convex");
    assert_eq!(
        QuadError::DegenerateArea { area: 0.0 }.kind(),
        "degenerate_area"
    );
}

/// Random convex quad: four angles in separate quadrants on an ellipse.
fn convex_quad_strategy() -> impl Strategy<Value = [Vector2<f64>; 4]> {
    (
        prop::array::uniform4(0.1f64..1.4),
        1.0f64..10.0,
        1.0f64..10.0,
        -50.0f64..50.0,
        -50.0f64..50.0,
    )
        .prop_map(|(offsets, rx, ry, cx, cy)| {
            let mut out = [Vector2::zeros(); 4];
            for (k, off) in offsets.iter().enumerate() {
                let th = k as f64 * std::f64::consts::FRAC_PI_2 + off;
                out[k] = Vector2::new(cx + rx * th.cos(), cy + ry * th.sin());
            }
            out
        })
}

proptest! {
    #[test]
    fn reversed_input_keeps_perimeter(v in convex_quad_strategy()) {
        let q = ConvexQuad::new(v).unwrap();
        let mut rev = v;
        rev.reverse();
        let r = ConvexQuad::new(rev).unwrap();
        prop_assert!((q.perimeter() - r.perimeter()).abs() < 1e-9);

        let ordered = ConvexQuad::from_ordered(v).unwrap();
        let ordered_rev = ConvexQuad::from_ordered(rev).unwrap();
        prop_assert_eq!(ordered.orientation(), Orientation::CounterClockwise);
        prop_assert_eq!(ordered_rev.orientation(), Orientation::Clockwise);
        prop_assert!((ordered.perimeter() - ordered_rev.perimeter()).abs() < 1e-9);
    }

    #[test]
    fn rotated_start_keeps_perimeter(v in convex_quad_strategy(), k in 0usize..4) {
        let q = ConvexQuad::from_ordered(v).unwrap();
        let mut rot = v;
        rot.rotate_left(k);
        let r = ConvexQuad::from_ordered(rot).unwrap();
        prop_assert!((q.perimeter() - r.perimeter()).abs() < 1e-9);
        prop_assert_eq!(q.orientation(), r.orientation());
    }

    #[test]
    fn hull_order_is_canonical(v in convex_quad_strategy(), k in 0usize..4) {
        let mut shuffled = v;
        shuffled.swap(0, k);
        let a = ConvexQuad::new(v).unwrap();
        let b = ConvexQuad::new(shuffled).unwrap();
        prop_assert_eq!(a.vertices(), b.vertices());
        prop_assert_eq!(a.orientation(), Orientation::CounterClockwise);
    }
}
