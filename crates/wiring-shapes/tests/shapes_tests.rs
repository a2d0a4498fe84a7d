//! Shape wiring tests
//!
//! Delegated calls must produce exactly what the provider produces when
//! called directly, for any input.

use proptest::prelude::*;
use std::f64::consts::PI;
use wiring_shapes::prelude::*;
use wiring_shapes::{shape_registry, total_area};

fn dimension() -> impl Strategy<Value = f64> {
    0.0f64..1.0e6
}

proptest! {
    #[test]
    fn rect_area_equals_direct_provider(width in dimension(), height in dimension()) {
        let rect = Rect { width, height };
        prop_assert_eq!(rect.area(), <RectangleArea as AreaCalculator<Rect>>::area(&rect));
        prop_assert_eq!(rect.area(), width * height);
    }

    #[test]
    fn circ_area_equals_direct_provider(radius in dimension()) {
        let circ = Circ { radius };
        prop_assert_eq!(circ.area(), <CircleArea as AreaCalculator<Circ>>::area(&circ));
        prop_assert_eq!(circ.area(), PI * radius * radius);
    }

    #[test]
    fn tile_and_rect_agree(width in dimension(), height in dimension()) {
        let tile = Tile { width, height };
        let rect = Rect { width, height };
        prop_assert_eq!(tile.area(), rect.area());
        prop_assert_eq!(tile.perimeter(), rect.perimeter());
    }

    #[test]
    fn poster_scales_inner_area(
        width in dimension(),
        height in dimension(),
        scale in 0.0f64..100.0,
    ) {
        let poster = Poster { width, height, scale };
        let expected = width * height * scale * scale;
        prop_assert_eq!(poster.area(), expected);
    }

    #[test]
    fn repeated_calls_are_deterministic(side in dimension()) {
        let square = Square { side };
        let first = square.perimeter();
        for _ in 0..4 {
            prop_assert_eq!(square.perimeter(), first);
        }
    }

    #[test]
    fn runtime_path_matches_static_path(width in dimension(), height in dimension()) {
        let registry = shape_registry().unwrap();
        let rect = Rect { width, height };
        let dynamic = registry
            .invoke::<Rect, AreaCalculatorComponent, (), f64>(&rect, ())
            .unwrap();
        prop_assert_eq!(dynamic, rect.area());
    }
}

#[test]
fn rect_three_by_four() {
    assert_eq!(Rect { width: 3.0, height: 4.0 }.area(), 12.0);
}

#[test]
fn circ_radius_two() {
    let area = Circ { radius: 2.0 }.area();
    assert!((area - 12.566).abs() < 1e-3);
}

#[test]
fn heterogeneous_total() {
    let rect = Rect {
        width: 3.0,
        height: 4.0,
    };
    let circ = Circ { radius: 1.0 };
    let poster = Poster {
        width: 1.0,
        height: 1.0,
        scale: 3.0,
    };
    let total = total_area(&[&rect, &circ, &poster]);
    assert!((total - (12.0 + PI + 9.0)).abs() < 1e-12);
}

#[test]
fn shape_manifest_is_stable() {
    let first = shape_registry().unwrap().manifest();
    let second = shape_registry().unwrap().manifest();
    assert_eq!(first, second);

    let shorts: Vec<String> = first.iter().map(|entry| entry.short().to_string()).collect();
    assert!(shorts.contains(&"Tile / AreaCalculatorComponent -> PolygonPreset".to_string()));
    assert!(shorts.contains(&"Square / PerimeterCalculatorComponent -> SquarePerimeter".to_string()));
}
