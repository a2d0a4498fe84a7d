//! Wiring Inspect
//!
//! Checks wiring plans, TOML descriptions of which provider each context
//! uses for each capability, against the delegation rules, and renders valid
//! plans as `delegate_components!` source.
//!
//! # Core Concepts
//!
//! - [`WiringPlan`]: capabilities, providers, contexts and delegations
//! - [`PlanValidator`]: collects every problem into a [`PlanReport`]
//! - [`PlanRenderer`]: one `delegate_components!` block per context
//! - [`InspectConfig`]: settings for the `wiring-inspect` binary
//!
//! # Example
//!
//! ```rust
//! use wiring_inspect::{PlanRenderer, PlanValidator, WiringPlan};
//!
//! let plan = WiringPlan::from_toml_str(r#"
//!     [[capability]]
//!     name = "AreaCalculator"
//!
//!     [[provider]]
//!     name = "RectangleArea"
//!     implements = ["AreaCalculator"]
//!
//!     [[context]]
//!     name = "Rect"
//!     uses = ["AreaCalculator"]
//!
//!     [[delegation]]
//!     context = "Rect"
//!     capability = "AreaCalculator"
//!     provider = "RectangleArea"
//! "#).unwrap();
//!
//! let report = PlanValidator::new().validate(&plan);
//! assert!(report.is_valid());
//!
//! let source = PlanRenderer::new().render(&plan, &report).unwrap();
//! assert!(source.contains("AreaCalculatorComponent: RectangleArea,"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod logging;
pub mod plan;
pub mod render;
pub mod validate;

// Re-exports
pub use config::{InspectConfig, LogFormat, LOG_ENV};
pub use error::PlanError;
pub use logging::init_logging;
pub use plan::{CapabilityDecl, ContextDecl, DelegationDecl, ProviderDecl, WiringPlan};
pub use render::PlanRenderer;
pub use validate::{PlanDiagnostic, PlanReport, PlanValidator};

use std::path::Path;

/// Load a plan file and validate it with the configured rules
///
/// # Errors
/// Returns [`PlanError::Io`] or [`PlanError::Parse`] if the plan cannot be
/// loaded. Validation problems are returned in the report, not as an error.
pub fn inspect_file(
    path: impl AsRef<Path>,
    config: &InspectConfig,
) -> Result<(WiringPlan, PlanReport), PlanError> {
    let plan = WiringPlan::load(path)?;
    let report = config.validator().validate(&plan);
    Ok((plan, report))
}

/// Load, validate and render a plan file
///
/// # Errors
/// Returns [`PlanError::Invalid`] if validation finds problems, plus the
/// loading and rendering errors.
pub fn render_file(path: impl AsRef<Path>, config: &InspectConfig) -> Result<String, PlanError> {
    let (plan, report) = inspect_file(path, config)?;
    config.renderer().render(&plan, &report)
}

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for plan inspection
    pub use crate::{
        InspectConfig, PlanDiagnostic, PlanError, PlanRenderer, PlanReport, PlanValidator,
        WiringPlan,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
