//! Wiring Shapes
//!
//! Geometry wired with configurable static dispatch. Each shape is a context
//! that picks, per capability, one provider out of several that would work.
//!
//! # Core Concepts
//!
//! - Capabilities: [`CanCalculateArea`], [`CanCalculatePerimeter`],
//!   [`CanDescribeShape`]
//! - Providers: [`RectangleArea`], [`CircleArea`], [`SquareArea`],
//!   [`ScaledArea`] and the perimeter and summary providers
//! - Contexts: [`Rect`], [`Circ`], [`Square`], [`Tile`] (through the
//!   [`PolygonPreset`] table) and [`Poster`]
//!
//! # Example
//!
//! ```rust
//! use wiring_shapes::{CanCalculateArea, Circ, Rect};
//!
//! let rect = Rect { width: 3.0, height: 4.0 };
//! assert_eq!(rect.area(), 12.0);
//!
//! let circ = Circ { radius: 2.0 };
//! assert!((circ.area() - std::f64::consts::PI * 4.0).abs() < 1e-12);
//! ```
//!
//! Repeating an identical entry is accepted, within a block or across blocks
//! of the same invocation:
//!
//! ```rust
//! use wiring_core::delegate_components;
//! use wiring_shapes::{AreaCalculatorComponent, CanCalculateArea, HasSide, SquareArea};
//!
//! pub struct Block;
//!
//! impl HasSide for Block {
//!     fn side(&self) -> f64 {
//!         2.0
//!     }
//! }
//!
//! delegate_components! {
//!     Block {
//!         AreaCalculatorComponent: SquareArea,
//!         AreaCalculatorComponent: SquareArea,
//!     }
//!
//!     Block {
//!         AreaCalculatorComponent: SquareArea,
//!     }
//! }
//!
//! assert_eq!(Block.area(), 4.0);
//! ```
//!
//! Two different providers for the same capability in one table do not
//! build:
//!
//! ```rust,compile_fail
//! use wiring_core::delegate_components;
//! use wiring_shapes::{AreaCalculatorComponent, RectangleArea, SquareArea};
//! use wiring_shapes::{HasHeight, HasSide, HasWidth};
//!
//! pub struct Block;
//!
//! impl HasWidth for Block {
//!     fn width(&self) -> f64 { 1.0 }
//! }
//! impl HasHeight for Block {
//!     fn height(&self) -> f64 { 1.0 }
//! }
//! impl HasSide for Block {
//!     fn side(&self) -> f64 { 1.0 }
//! }
//!
//! delegate_components! {
//!     Block {
//!         AreaCalculatorComponent: RectangleArea,
//!         AreaCalculatorComponent: SquareArea,
//!     }
//! }
//! ```
//!
//! Neither do they when split across separate `delegate_components!`
//! invocations:
//!
//! ```rust,compile_fail,E0119
//! use wiring_core::delegate_components;
//! use wiring_shapes::{AreaCalculatorComponent, RectangleArea, SquareArea};
//! use wiring_shapes::{HasHeight, HasSide, HasWidth};
//!
//! pub struct Block;
//!
//! impl HasWidth for Block {
//!     fn width(&self) -> f64 { 1.0 }
//! }
//! impl HasHeight for Block {
//!     fn height(&self) -> f64 { 1.0 }
//! }
//! impl HasSide for Block {
//!     fn side(&self) -> f64 { 1.0 }
//! }
//!
//! delegate_components! {
//!     Block {
//!         AreaCalculatorComponent: RectangleArea,
//!     }
//! }
//!
//! delegate_components! {
//!     Block {
//!         AreaCalculatorComponent: SquareArea,
//!     }
//! }
//! ```
//!
//! Registering a provider whose requirements the context does not meet fails
//! at the registration:
//!
//! ```rust,compile_fail,E0277
//! use wiring_core::delegate_components;
//! use wiring_shapes::{AreaCalculatorComponent, CircleArea, HasSide};
//!
//! pub struct Block;
//!
//! impl HasSide for Block {
//!     fn side(&self) -> f64 { 1.0 }
//! }
//!
//! delegate_components! {
//!     Block {
//!         AreaCalculatorComponent: CircleArea,
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod accessors;
pub mod capabilities;
pub mod contexts;
pub mod dispatch;
pub mod providers;

pub use accessors::{HasHeight, HasRadius, HasScaleFactor, HasSide, HasWidth};
pub use capabilities::{
    AreaCalculator, AreaCalculatorComponent, CanCalculateArea, CanCalculatePerimeter,
    CanDescribeShape, PerimeterCalculator, PerimeterCalculatorComponent, ShapeDescriber,
    ShapeDescriberComponent,
};
pub use contexts::{Circ, PolygonPreset, Poster, Rect, Square, Tile};
pub use dispatch::{shape_registry, total_area, total_perimeter};
pub use providers::{
    CircleArea, CirclePerimeter, FullSummary, PerimeterSummary, RectangleArea, RectanglePerimeter,
    ScaledArea, SquareArea, SquarePerimeter,
};

/// Prelude for common imports
pub mod prelude {
    //! Common imports for working with shapes

    pub use crate::accessors::*;
    pub use crate::capabilities::*;
    pub use crate::contexts::*;
    pub use crate::providers::*;
}

/// Version of the wiring-shapes crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
