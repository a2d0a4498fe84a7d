//! Render a validated plan as `delegate_components!` source

use crate::error::PlanError;
use crate::plan::WiringPlan;
use crate::validate::PlanReport;

/// Turns resolved plan entries into Rust source
#[derive(Debug, Clone)]
pub struct PlanRenderer {
    header: bool,
    crate_path: String,
}

impl Default for PlanRenderer {
    fn default() -> Self {
        Self {
            header: true,
            crate_path: "wiring_core".to_string(),
        }
    }
}

impl PlanRenderer {
    /// Create renderer with defaults
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With or without the generated-file header comment
    #[inline]
    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// With the path the macro is imported from
    #[inline]
    #[must_use]
    pub fn with_crate_path(mut self, crate_path: impl Into<String>) -> Self {
        self.crate_path = crate_path.into();
        self
    }

    /// Render one `delegate_components!` block per declared context.
    ///
    /// # Errors
    /// - [`PlanError::Invalid`] if the report has problems
    /// - [`PlanError::Render`] if a name is not a valid Rust type
    pub fn render(&self, plan: &WiringPlan, report: &PlanReport) -> Result<String, PlanError> {
        if !report.is_valid() {
            return Err(PlanError::Invalid(report.clone()));
        }
        check_path(&self.crate_path)?;

        let mut out = String::new();
        if self.header {
            out.push_str("// Generated by wiring-inspect. Do not edit.\n\n");
        }
        out.push_str(&format!("use {}::delegate_components;\n\n", self.crate_path));
        out.push_str("delegate_components! {\n");

        for (index, context) in plan.contexts.iter().enumerate() {
            check_type(&context.name)?;
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&format!("    {} {{\n", context.name));
            for entry in report.entries_for(&context.name) {
                check_type(&entry.component)?;
                check_type(&entry.provider)?;
                out.push_str(&format!(
                    "        {}: {},\n",
                    entry.component, entry.provider
                ));
            }
            out.push_str("    }\n");
        }

        out.push_str("}\n");
        tracing::debug!(contexts = plan.contexts.len(), bytes = out.len(), "plan rendered");
        Ok(out)
    }
}

fn check_type(name: &str) -> Result<(), PlanError> {
    syn::parse_str::<syn::Type>(name)
        .map(drop)
        .map_err(|e| PlanError::Render(format!("`{name}` is not a valid type: {e}")))
}

fn check_path(path: &str) -> Result<(), PlanError> {
    syn::parse_str::<syn::Path>(path)
        .map(drop)
        .map_err(|e| PlanError::Render(format!("`{path}` is not a valid path: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{CapabilityDecl, DelegationDecl};
    use crate::validate::PlanValidator;
    use pretty_assertions::assert_eq;

    fn plan() -> WiringPlan {
        WiringPlan::new()
            .with_capability(CapabilityDecl::new("AreaCalculator"))
            .with_provider("RectangleArea", &["AreaCalculator"])
            .with_provider("ScaledArea<RectangleArea>", &["AreaCalculator"])
            .with_context("Rect", &["AreaCalculator"])
            .with_context("Poster", &["AreaCalculator"])
            .with_context("Blank", &[])
            .with_delegation(DelegationDecl::new("Rect", "AreaCalculator", "RectangleArea"))
            .with_delegation(DelegationDecl::new(
                "Poster",
                "AreaCalculator",
                "ScaledArea<RectangleArea>",
            ))
    }

    #[test]
    fn renders_one_block_per_context() {
        let plan = plan();
        let report = PlanValidator::new().validate(&plan);
        let source = PlanRenderer::new()
            .with_header(false)
            .render(&plan, &report)
            .unwrap();

        let expected = "\
use wiring_core::delegate_components;

delegate_components! {
    Rect {
        AreaCalculatorComponent: RectangleArea,
    }

    Poster {
        AreaCalculatorComponent: ScaledArea<RectangleArea>,
    }

    Blank {
    }
}
";
        assert_eq!(source, expected);
    }

    #[test]
    fn header_and_crate_path_are_configurable() {
        let plan = plan();
        let report = PlanValidator::new().validate(&plan);
        let source = PlanRenderer::new()
            .with_crate_path("my_app::wiring")
            .render(&plan, &report)
            .unwrap();
        assert!(source.starts_with("// Generated by wiring-inspect"));
        assert!(source.contains("use my_app::wiring::delegate_components;"));
    }

    #[test]
    fn invalid_report_is_not_rendered() {
        let plan = plan().with_delegation(DelegationDecl::new("Rect", "AreaCalculator", "Nobody"));
        let report = PlanValidator::new().validate(&plan);
        let err = PlanRenderer::new().render(&plan, &report).unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(err.report(), Some(&report));
    }

    #[test]
    fn invalid_type_names_are_render_errors() {
        let plan = WiringPlan::new()
            .with_capability(CapabilityDecl::new("Area"))
            .with_provider("not a type", &["Area"])
            .with_context("Rect", &["Area"])
            .with_delegation(DelegationDecl::new("Rect", "Area", "not a type"));
        let report = PlanValidator::new().validate(&plan);
        let err = PlanRenderer::new().render(&plan, &report).unwrap_err();
        assert!(matches!(err, PlanError::Render(_)));
    }
}
