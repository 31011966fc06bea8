use delve_geom::{Rect, Vec2, Vec3};
use proptest::prelude::*;

fn unit() -> impl Strategy<Value = f32> {
    0.0f32..=1.0
}

fn arb_rect() -> impl Strategy<Value = Rect> {
    (0.0f32..0.5, 0.0f32..0.5, 0.01f32..0.5, 0.01f32..0.5)
        .prop_map(|(x, y, w, h)| Rect::new(Vec2::new(x, y), Vec2::new(x + w, y + h)))
}

proptest! {
    // Every point of the unit square lands inside the rectangle
    #[test]
    fn lerp_stays_inside(r in arb_rect(), tx in unit(), ty in unit()) {
        prop_assert!(r.contains(r.lerp(Vec2::new(tx, ty))));
    }

    // Addition commutativity for grid-built vectors
    #[test]
    fn grid_vec_add_commutative(a in -1000i32..1000, b in -1000i32..1000, c in -1000i32..1000) {
        let u = Vec3::from_grid(a, b, c);
        let v = Vec3::from_grid(c, a, b);
        prop_assert_eq!(u + v, v + u);
        prop_assert_eq!((u + v) - v, u);
    }
}
