//! Wiring Core
//!
//! Configurable static dispatch: every context type picks, per capability,
//! exactly one provider, and the choice is resolved by the trait solver.
//!
//! # Core Concepts
//!
//! - [`macro@capability`]: declares a capability from a consumer trait
//! - [`delegate_components!`]: registers `(Context, Capability) -> Provider`
//! - [`Resolved`]: build-time lookup of the registered provider
//! - [`check_components!`] / [`assert_delegation!`]: build-time assertions
//! - [`DynamicRegistry`]: optional runtime dispatch with the same rules
//!
//! # Example
//!
//! ```rust
//! use wiring_core::{capability, delegate_components, check_components};
//!
//! pub trait HasSide {
//!     fn side(&self) -> f64;
//! }
//!
//! #[capability(AreaCalculatorComponent, AreaCalculator)]
//! pub trait CanCalculateArea {
//!     fn area(&self) -> f64;
//! }
//!
//! pub struct SquareArea;
//!
//! impl<Context: HasSide> AreaCalculator<Context> for SquareArea {
//!     fn area(context: &Context) -> f64 {
//!         context.side() * context.side()
//!     }
//! }
//!
//! pub struct Tile {
//!     side: f64,
//! }
//!
//! impl HasSide for Tile {
//!     fn side(&self) -> f64 {
//!         self.side
//!     }
//! }
//!
//! delegate_components! {
//!     Tile {
//!         AreaCalculatorComponent: SquareArea,
//!     }
//! }
//!
//! check_components!(Tile: [AreaCalculatorComponent]);
//!
//! assert_eq!(Tile { side: 3.0 }.area(), 9.0);
//! ```
//!
//! Using a capability the context never registered does not build:
//!
//! ```rust,compile_fail,E0599
//! use wiring_core::capability;
//!
//! #[capability(GreeterComponent, Greeter)]
//! pub trait CanGreet {
//!     fn greet(&self) -> String;
//! }
//!
//! pub struct Guest;
//!
//! let _ = Guest.greet();
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Generated code refers to `::wiring_core`, including inside this crate's tests.
extern crate self as wiring_core;

#[macro_use]
mod macros;

mod delegate;
mod entry;
mod error;

/// Runtime dispatch path
pub mod dynamic;

// Re-exports
pub use delegate::{describe, CanUseComponent, DelegateComponent, ProvidedBy, Resolved};
pub use dynamic::DynamicRegistry;
pub use entry::{short_type_name, DelegationEntry};
pub use error::DelegationError;
pub use wiring_macros::{capability, delegate_components};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for declaring and wiring capabilities
    pub use crate::{
        assert_delegation, capability, check_components, delegate_components, CanUseComponent,
        DelegateComponent, DelegationEntry, DelegationError, DynamicRegistry, ProvidedBy,
        Resolved,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
