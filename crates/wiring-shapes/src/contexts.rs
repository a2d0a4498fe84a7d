//! Shape contexts and their delegation tables

use crate::accessors::{HasHeight, HasRadius, HasScaleFactor, HasSide, HasWidth};
use crate::capabilities::{
    AreaCalculatorComponent, PerimeterCalculatorComponent, ShapeDescriberComponent,
};
use crate::providers::{
    CircleArea, CirclePerimeter, FullSummary, PerimeterSummary, RectangleArea, RectanglePerimeter,
    ScaledArea, SquarePerimeter,
};
use wiring_core::delegate_components;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// Circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circ {
    /// Radius
    pub radius: f64,
}

/// Square with a perimeter provider and no area provider.
///
/// Asking it for an area does not build:
///
/// ```compile_fail,E0599
/// use wiring_shapes::{CanCalculateArea, Square};
///
/// let square = Square { side: 5.0 };
/// let _ = square.area();
/// ```
///
/// and neither does asserting that it could:
///
/// ```compile_fail,E0277
/// use wiring_core::check_components;
/// use wiring_shapes::{AreaCalculatorComponent, Square};
///
/// check_components!(Square: [AreaCalculatorComponent]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    /// Side length
    pub side: f64,
}

/// Rectangular floor tile; wired through [`PolygonPreset`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// Rectangle printed at a scale; its area is scaled by `scale²`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Poster {
    /// Width before scaling
    pub width: f64,
    /// Height before scaling
    pub height: f64,
    /// Linear scale factor
    pub scale: f64,
}

/// Reusable table for rectangular polygons
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonPreset;

impl HasWidth for Rect {
    fn width(&self) -> f64 {
        self.width
    }
}

impl HasHeight for Rect {
    fn height(&self) -> f64 {
        self.height
    }
}

impl HasRadius for Circ {
    fn radius(&self) -> f64 {
        self.radius
    }
}

impl HasSide for Square {
    fn side(&self) -> f64 {
        self.side
    }
}

impl HasWidth for Tile {
    fn width(&self) -> f64 {
        self.width
    }
}

impl HasHeight for Tile {
    fn height(&self) -> f64 {
        self.height
    }
}

impl HasWidth for Poster {
    fn width(&self) -> f64 {
        self.width
    }
}

impl HasHeight for Poster {
    fn height(&self) -> f64 {
        self.height
    }
}

impl HasScaleFactor for Poster {
    fn scale_factor(&self) -> f64 {
        self.scale
    }
}

delegate_components! {
    Rect {
        AreaCalculatorComponent: RectangleArea,
        PerimeterCalculatorComponent: RectanglePerimeter,
        ShapeDescriberComponent: FullSummary,
    }

    Circ {
        AreaCalculatorComponent: CircleArea,
        PerimeterCalculatorComponent: CirclePerimeter,
    }

    Square {
        PerimeterCalculatorComponent: SquarePerimeter,
        ShapeDescriberComponent: PerimeterSummary,
    }

    #[table]
    PolygonPreset {
        AreaCalculatorComponent: RectangleArea,
        PerimeterCalculatorComponent: RectanglePerimeter,
        ShapeDescriberComponent: FullSummary,
    }

    Tile {
        [
            AreaCalculatorComponent,
            PerimeterCalculatorComponent,
            ShapeDescriberComponent,
        ]: PolygonPreset,
    }

    Poster {
        AreaCalculatorComponent: ScaledArea<RectangleArea>,
        PerimeterCalculatorComponent: RectanglePerimeter,
    }
}
