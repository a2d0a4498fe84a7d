//! Runtime dispatch over shapes
//!
//! Static wiring stays the default. When the set of shapes is only known at
//! run time, the consumer traits are object safe and can be used through
//! `dyn`, and [`shape_registry`] mirrors the static tables into a
//! [`DynamicRegistry`] keyed by type.

use crate::capabilities::{
    AreaCalculatorComponent, CanCalculateArea, CanCalculatePerimeter, PerimeterCalculatorComponent,
};
use crate::contexts::{Circ, Poster, Rect, Square, Tile};
use wiring_core::{DelegationError, DynamicRegistry};

/// Sum of the areas of a heterogeneous set of shapes
#[must_use]
pub fn total_area(shapes: &[&dyn CanCalculateArea]) -> f64 {
    let total = shapes.iter().map(|shape| shape.area()).sum();
    tracing::debug!(shapes = shapes.len(), total, "summed areas");
    total
}

/// Sum of the perimeters of a heterogeneous set of shapes
#[must_use]
pub fn total_perimeter(shapes: &[&dyn CanCalculatePerimeter]) -> f64 {
    shapes.iter().map(|shape| shape.perimeter()).sum()
}

/// Registry holding every static shape entry, with handlers that call the
/// statically wired implementation.
///
/// # Errors
/// Only fails if two entries disagree, which the static tables rule out.
pub fn shape_registry() -> Result<DynamicRegistry, DelegationError> {
    let registry = DynamicRegistry::new();

    registry.mirror_static::<Rect, AreaCalculatorComponent, (), f64>(|shape, ()| shape.area())?;
    registry.mirror_static::<Circ, AreaCalculatorComponent, (), f64>(|shape, ()| shape.area())?;
    registry.mirror_static::<Tile, AreaCalculatorComponent, (), f64>(|shape, ()| shape.area())?;
    registry.mirror_static::<Poster, AreaCalculatorComponent, (), f64>(|shape, ()| shape.area())?;

    registry.mirror_static::<Rect, PerimeterCalculatorComponent, (), f64>(|shape, ()| {
        shape.perimeter()
    })?;
    registry.mirror_static::<Circ, PerimeterCalculatorComponent, (), f64>(|shape, ()| {
        shape.perimeter()
    })?;
    registry.mirror_static::<Square, PerimeterCalculatorComponent, (), f64>(|shape, ()| {
        shape.perimeter()
    })?;
    registry.mirror_static::<Tile, PerimeterCalculatorComponent, (), f64>(|shape, ()| {
        shape.perimeter()
    })?;
    registry.mirror_static::<Poster, PerimeterCalculatorComponent, (), f64>(|shape, ()| {
        shape.perimeter()
    })?;

    tracing::info!(entries = registry.len(), "shape registry ready");
    Ok(registry)
}
