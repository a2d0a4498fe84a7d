//! Providers
//!
//! Each provider is generic over every context that meets its requirements.
//! Several of them are eligible for the same context; the context's
//! delegation table picks one.

use crate::accessors::{HasHeight, HasRadius, HasScaleFactor, HasSide, HasWidth};
use crate::capabilities::{
    AreaCalculator, CanCalculateArea, CanCalculatePerimeter, PerimeterCalculator, ShapeDescriber,
};
use std::f64::consts::PI;
use std::marker::PhantomData;

/// `width * height`
#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleArea;

impl<Context> AreaCalculator<Context> for RectangleArea
where
    Context: HasWidth + HasHeight,
{
    fn area(context: &Context) -> f64 {
        context.width() * context.height()
    }
}

/// `π * radius²`
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleArea;

impl<Context> AreaCalculator<Context> for CircleArea
where
    Context: HasRadius,
{
    fn area(context: &Context) -> f64 {
        PI * context.radius() * context.radius()
    }
}

/// `side²`
#[derive(Debug, Clone, Copy, Default)]
pub struct SquareArea;

impl<Context> AreaCalculator<Context> for SquareArea
where
    Context: HasSide,
{
    fn area(context: &Context) -> f64 {
        context.side() * context.side()
    }
}

/// Area of `Inner` scaled by the square of the context's scale factor
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaledArea<Inner>(PhantomData<Inner>);

impl<Context, Inner> AreaCalculator<Context> for ScaledArea<Inner>
where
    Context: HasScaleFactor,
    Inner: AreaCalculator<Context>,
{
    fn area(context: &Context) -> f64 {
        let scale = context.scale_factor();
        Inner::area(context) * scale * scale
    }
}

/// `2 * (width + height)`
#[derive(Debug, Clone, Copy, Default)]
pub struct RectanglePerimeter;

impl<Context> PerimeterCalculator<Context> for RectanglePerimeter
where
    Context: HasWidth + HasHeight,
{
    fn perimeter(context: &Context) -> f64 {
        2.0 * (context.width() + context.height())
    }
}

/// `2π * radius`
#[derive(Debug, Clone, Copy, Default)]
pub struct CirclePerimeter;

impl<Context> PerimeterCalculator<Context> for CirclePerimeter
where
    Context: HasRadius,
{
    fn perimeter(context: &Context) -> f64 {
        2.0 * PI * context.radius()
    }
}

/// `4 * side`
#[derive(Debug, Clone, Copy, Default)]
pub struct SquarePerimeter;

impl<Context> PerimeterCalculator<Context> for SquarePerimeter
where
    Context: HasSide,
{
    fn perimeter(context: &Context) -> f64 {
        4.0 * context.side()
    }
}

/// Describes area and perimeter; needs both capabilities wired
#[derive(Debug, Clone, Copy, Default)]
pub struct FullSummary;

impl<Context> ShapeDescriber<Context> for FullSummary
where
    Context: CanCalculateArea + CanCalculatePerimeter,
{
    fn describe(context: &Context) -> String {
        format!(
            "area {:.3}, perimeter {:.3}",
            context.area(),
            context.perimeter()
        )
    }
}

/// Describes the perimeter only
#[derive(Debug, Clone, Copy, Default)]
pub struct PerimeterSummary;

impl<Context> ShapeDescriber<Context> for PerimeterSummary
where
    Context: CanCalculatePerimeter,
{
    fn describe(context: &Context) -> String {
        format!("perimeter {:.3}", context.perimeter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl HasWidth for Probe {
        fn width(&self) -> f64 {
            2.0
        }
    }

    impl HasHeight for Probe {
        fn height(&self) -> f64 {
            5.0
        }
    }

    impl HasRadius for Probe {
        fn radius(&self) -> f64 {
            1.0
        }
    }

    impl HasSide for Probe {
        fn side(&self) -> f64 {
            3.0
        }
    }

    impl HasScaleFactor for Probe {
        fn scale_factor(&self) -> f64 {
            2.0
        }
    }

    // Probe meets every requirement, so each provider can be called directly
    // without any delegation entry.
    #[test]
    fn providers_are_callable_without_registration() {
        assert_eq!(<RectangleArea as AreaCalculator<Probe>>::area(&Probe), 10.0);
        assert!((<CircleArea as AreaCalculator<Probe>>::area(&Probe) - PI).abs() < 1e-12);
        assert_eq!(<SquareArea as AreaCalculator<Probe>>::area(&Probe), 9.0);
        assert_eq!(<RectanglePerimeter as PerimeterCalculator<Probe>>::perimeter(&Probe), 14.0);
        assert_eq!(<SquarePerimeter as PerimeterCalculator<Probe>>::perimeter(&Probe), 12.0);
    }

    #[test]
    fn scaled_area_wraps_inner_provider() {
        let scaled = <ScaledArea<RectangleArea> as AreaCalculator<Probe>>::area(&Probe);
        assert_eq!(scaled, 40.0);

        let nested = <ScaledArea<ScaledArea<SquareArea>> as AreaCalculator<Probe>>::area(&Probe);
        assert_eq!(nested, 9.0 * 16.0);
    }
}
