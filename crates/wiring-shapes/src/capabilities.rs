//! Shape capabilities

use wiring_core::capability;

/// Compute the area of a shape
#[capability(AreaCalculatorComponent, AreaCalculator)]
pub trait CanCalculateArea {
    /// Area in square units
    fn area(&self) -> f64;
}

/// Compute the perimeter of a shape
#[capability(PerimeterCalculatorComponent, PerimeterCalculator)]
pub trait CanCalculatePerimeter {
    /// Perimeter in units
    fn perimeter(&self) -> f64;
}

/// Human-readable summary of a shape
#[capability(ShapeDescriberComponent, ShapeDescriber)]
pub trait CanDescribeShape {
    /// One-line description
    fn describe(&self) -> String;
}
