//! Field accessors required by the providers
//!
//! These are plain traits implemented by each shape; providers state which
//! ones they need.

/// Width of a rectangular shape
pub trait HasWidth {
    /// Width in units
    fn width(&self) -> f64;
}

/// Height of a rectangular shape
pub trait HasHeight {
    /// Height in units
    fn height(&self) -> f64;
}

/// Radius of a round shape
pub trait HasRadius {
    /// Radius in units
    fn radius(&self) -> f64;
}

/// Side length of a square shape
pub trait HasSide {
    /// Side in units
    fn side(&self) -> f64;
}

/// Linear scale applied when a shape is printed or displayed
pub trait HasScaleFactor {
    /// Linear scale factor
    fn scale_factor(&self) -> f64;
}
