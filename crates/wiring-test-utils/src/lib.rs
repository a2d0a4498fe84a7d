//! Testing utilities for the wiring workspace
//!
//! Probe types for registry tests and sample wiring plans.

#![allow(missing_docs)]

use std::path::PathBuf;
use tempfile::TempDir;
use wiring_core::DynamicRegistry;
use wiring_inspect::WiringPlan;

/// Context used by registry tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub value: i64,
}

/// Second context, so pairs differ by context
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OtherProbe {
    pub value: i64,
}

pub struct DoubleComponent;
pub struct NegateComponent;

pub struct DoubleProvider;
pub struct TripleProvider;
pub struct NegateProvider;

/// Registry with `Probe` doubling and `OtherProbe` negating
pub fn probe_registry() -> DynamicRegistry {
    let registry = DynamicRegistry::new();
    registry
        .register::<Probe, DoubleComponent, DoubleProvider, _, _>(|probe: &Probe, ()| probe.value * 2)
        .unwrap();
    registry
        .register::<OtherProbe, NegateComponent, NegateProvider, _, _>(|probe: &OtherProbe, ()| {
            -probe.value
        })
        .unwrap();
    registry
}

/// The shapes wiring as a plan
pub const SHAPES_PLAN: &str = r#"
[[capability]]
name = "AreaCalculator"

[[capability]]
name = "PerimeterCalculator"

[[provider]]
name = "RectangleArea"
implements = ["AreaCalculator"]

[[provider]]
name = "CircleArea"
implements = ["AreaCalculator"]

[[provider]]
name = "RectanglePerimeter"
implements = ["PerimeterCalculator"]

[[provider]]
name = "SquarePerimeter"
implements = ["PerimeterCalculator"]

[[context]]
name = "Rect"
uses = ["AreaCalculator", "PerimeterCalculator"]

[[context]]
name = "Circ"
uses = ["AreaCalculator"]

[[context]]
name = "Square"
uses = ["PerimeterCalculator"]

[[delegation]]
context = "Rect"
capability = "AreaCalculator"
provider = "RectangleArea"

[[delegation]]
context = "Rect"
capability = "PerimeterCalculator"
provider = "RectanglePerimeter"

[[delegation]]
context = "Circ"
capability = "AreaCalculator"
provider = "CircleArea"

[[delegation]]
context = "Square"
capability = "PerimeterCalculator"
provider = "SquarePerimeter"
"#;

/// A plan where `Rect` gets two area providers and `Square` asks for an area
/// nobody provides
pub const BROKEN_PLAN: &str = r#"
[[capability]]
name = "AreaCalculator"

[[provider]]
name = "RectangleArea"
implements = ["AreaCalculator"]

[[provider]]
name = "CircleArea"
implements = ["AreaCalculator"]

[[context]]
name = "Rect"
uses = ["AreaCalculator"]

[[context]]
name = "Square"
uses = ["AreaCalculator"]

[[delegation]]
context = "Rect"
capability = "AreaCalculator"
provider = "RectangleArea"

[[delegation]]
context = "Rect"
capability = "AreaCalculator"
provider = "CircleArea"
"#;

pub fn shapes_plan() -> WiringPlan {
    WiringPlan::from_toml_str(SHAPES_PLAN).unwrap()
}

/// Write `contents` to `name` inside a fresh temp dir. Keep the dir alive for
/// as long as the file is needed.
pub fn write_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

pub fn write_plan(contents: &str) -> (TempDir, PathBuf) {
    write_temp_file("plan.toml", contents)
}
