//! Plan validation
//!
//! Applies the delegation rules to a plan without building it: every name
//! must be declared, a provider must implement the capability it is chosen
//! for, each `(context, capability)` pair resolves to at most one provider,
//! and every capability a context uses must be delegated. Identical repeated
//! delegations collapse into one entry.
//!
//! All problems are collected into a [`PlanReport`]; validation never stops at
//! the first one.

use crate::plan::WiringPlan;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use wiring_core::DelegationEntry;

/// One validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanDiagnostic {
    /// The same name is declared twice in one section
    DuplicateDeclaration {
        /// `capability`, `provider` or `context`
        section: String,
        /// Repeated name
        name: String,
    },

    /// Reference to an undeclared context
    UnknownContext {
        /// Undeclared name
        name: String,
        /// Where the reference appears
        referenced_by: String,
    },

    /// Reference to an undeclared capability
    UnknownCapability {
        /// Undeclared name
        name: String,
        /// Where the reference appears
        referenced_by: String,
    },

    /// Reference to an undeclared provider
    UnknownProvider {
        /// Undeclared name
        name: String,
        /// Where the reference appears
        referenced_by: String,
    },

    /// The chosen provider does not implement the capability
    ProviderMismatch {
        /// Context name
        context: String,
        /// Capability name
        capability: String,
        /// Provider name
        provider: String,
    },

    /// A second, different provider for a pair that already has one
    ConflictingDelegation {
        /// Context name
        context: String,
        /// Capability name
        capability: String,
        /// Provider chosen first
        existing: String,
        /// Provider rejected
        attempted: String,
    },

    /// A capability the context uses has no delegation
    MissingDelegation {
        /// Context name
        context: String,
        /// Capability name
        capability: String,
    },

    /// Delegation for a capability the context does not list in `uses`
    /// (strict mode only)
    UndeclaredUse {
        /// Context name
        context: String,
        /// Capability name
        capability: String,
    },
}

impl PlanDiagnostic {
    /// Context the finding is about, if any
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::ProviderMismatch { context, .. }
            | Self::ConflictingDelegation { context, .. }
            | Self::MissingDelegation { context, .. }
            | Self::UndeclaredUse { context, .. } => Some(context),
            Self::UnknownContext { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for PlanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateDeclaration { section, name } => {
                write!(f, "{section} `{name}` is declared more than once")
            }
            Self::UnknownContext {
                name,
                referenced_by,
            } => write!(f, "unknown context `{name}` referenced by {referenced_by}"),
            Self::UnknownCapability {
                name,
                referenced_by,
            } => write!(f, "unknown capability `{name}` referenced by {referenced_by}"),
            Self::UnknownProvider {
                name,
                referenced_by,
            } => write!(f, "unknown provider `{name}` referenced by {referenced_by}"),
            Self::ProviderMismatch {
                context,
                capability,
                provider,
            } => write!(
                f,
                "`{provider}` does not implement `{capability}` (chosen for `{context}`)"
            ),
            Self::ConflictingDelegation {
                context,
                capability,
                existing,
                attempted,
            } => write!(
                f,
                "conflicting delegation for `{capability}` in `{context}`: \
                 already `{existing}`, cannot also be `{attempted}`"
            ),
            Self::MissingDelegation {
                context,
                capability,
            } => write!(f, "`{context}` uses `{capability}` but delegates it to nothing"),
            Self::UndeclaredUse {
                context,
                capability,
            } => write!(
                f,
                "`{context}` delegates `{capability}` without listing it in `uses`"
            ),
        }
    }
}

/// Outcome of validating a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReport {
    /// Every problem found, in discovery order
    pub diagnostics: Vec<PlanDiagnostic>,

    /// Resolved entries, in declaration order; component names are the
    /// capabilities' marker types
    pub entries: Vec<DelegationEntry>,

    /// Number of identical repeated delegations that were collapsed
    pub collapsed: usize,
}

impl PlanReport {
    /// Check if the plan has no problems
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Resolved entries of one context
    pub fn entries_for<'a>(&'a self, context: &'a str) -> impl Iterator<Item = &'a DelegationEntry> {
        self.entries.iter().filter(move |entry| entry.context == context)
    }

    /// Human-readable summary
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut text = format!(
            "{} entr{}, {} collapsed, {} problem(s)\n",
            self.entries.len(),
            if self.entries.len() == 1 { "y" } else { "ies" },
            self.collapsed,
            self.diagnostics.len()
        );
        for diagnostic in &self.diagnostics {
            text.push_str("  - ");
            text.push_str(&diagnostic.to_string());
            text.push('\n');
        }
        text
    }
}

/// Plan validator
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanValidator {
    strict: bool,
}

impl PlanValidator {
    /// Create validator with default rules
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With strict mode: delegations must be listed in the context's `uses`
    #[inline]
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate a plan and resolve its entries
    #[must_use]
    pub fn validate(&self, plan: &WiringPlan) -> PlanReport {
        let mut report = PlanReport::default();

        let capabilities = index_names(
            plan.capabilities.iter().map(|decl| decl.name.as_str()),
            "capability",
            &mut report,
        );
        let providers = index_names(
            plan.providers.iter().map(|decl| decl.name.as_str()),
            "provider",
            &mut report,
        );
        let contexts = index_names(
            plan.contexts.iter().map(|decl| decl.name.as_str()),
            "context",
            &mut report,
        );

        for provider in &plan.providers {
            for capability in &provider.implements {
                if !capabilities.contains(capability.as_str()) {
                    report.diagnostics.push(PlanDiagnostic::UnknownCapability {
                        name: capability.clone(),
                        referenced_by: format!("provider `{}`", provider.name),
                    });
                }
            }
        }

        for context in &plan.contexts {
            for capability in &context.uses {
                if !capabilities.contains(capability.as_str()) {
                    report.diagnostics.push(PlanDiagnostic::UnknownCapability {
                        name: capability.clone(),
                        referenced_by: format!("context `{}`", context.name),
                    });
                }
            }
        }

        // (context, capability) -> provider
        let mut resolved: IndexMap<(&str, &str), &str> = IndexMap::new();
        let mut attempted: IndexSet<(&str, &str)> = IndexSet::new();

        for (index, delegation) in plan.delegations.iter().enumerate() {
            let referenced_by = format!("delegation #{}", index + 1);
            let mut known = true;
            if !contexts.contains(delegation.context.as_str()) {
                report.diagnostics.push(PlanDiagnostic::UnknownContext {
                    name: delegation.context.clone(),
                    referenced_by: referenced_by.clone(),
                });
                known = false;
            }
            if !capabilities.contains(delegation.capability.as_str()) {
                report.diagnostics.push(PlanDiagnostic::UnknownCapability {
                    name: delegation.capability.clone(),
                    referenced_by: referenced_by.clone(),
                });
                known = false;
            }
            if !providers.contains(delegation.provider.as_str()) {
                report.diagnostics.push(PlanDiagnostic::UnknownProvider {
                    name: delegation.provider.clone(),
                    referenced_by,
                });
                known = false;
            }
            if !known {
                continue;
            }

            let pair = (delegation.context.as_str(), delegation.capability.as_str());
            attempted.insert(pair);

            let implements = plan
                .provider(&delegation.provider)
                .is_some_and(|provider| provider.implements(&delegation.capability));
            if !implements {
                report.diagnostics.push(PlanDiagnostic::ProviderMismatch {
                    context: delegation.context.clone(),
                    capability: delegation.capability.clone(),
                    provider: delegation.provider.clone(),
                });
                continue;
            }

            match resolved.get(&pair) {
                Some(existing) if *existing == delegation.provider => {
                    tracing::debug!(
                        context = %delegation.context,
                        capability = %delegation.capability,
                        "identical delegation collapsed"
                    );
                    report.collapsed += 1;
                }
                Some(existing) => {
                    report.diagnostics.push(PlanDiagnostic::ConflictingDelegation {
                        context: delegation.context.clone(),
                        capability: delegation.capability.clone(),
                        existing: (*existing).to_string(),
                        attempted: delegation.provider.clone(),
                    });
                }
                None => {
                    resolved.insert(pair, delegation.provider.as_str());
                }
            }
        }

        // a context declared twice still reports each missing pair once
        let mut missing = IndexSet::new();
        for context in &plan.contexts {
            for capability in &context.uses {
                let pair = (context.name.as_str(), capability.as_str());
                if capabilities.contains(capability.as_str())
                    && !attempted.contains(&pair)
                    && missing.insert(pair)
                {
                    report.diagnostics.push(PlanDiagnostic::MissingDelegation {
                        context: context.name.clone(),
                        capability: capability.clone(),
                    });
                }
            }
        }

        if self.strict {
            for (context, capability) in resolved.keys() {
                let listed = plan
                    .context(context)
                    .is_some_and(|decl| decl.uses.iter().any(|name| name == capability));
                if !listed {
                    report.diagnostics.push(PlanDiagnostic::UndeclaredUse {
                        context: (*context).to_string(),
                        capability: (*capability).to_string(),
                    });
                }
            }
        }

        report.entries = resolved
            .iter()
            .map(|((context, capability), provider)| {
                let component = plan
                    .capability(capability)
                    .map_or_else(|| format!("{capability}Component"), |decl| decl.component_name());
                DelegationEntry::new(*context, component, *provider)
            })
            .collect();

        for diagnostic in &report.diagnostics {
            tracing::warn!(%diagnostic, "plan problem");
        }
        report
    }
}

fn index_names<'a>(
    names: impl Iterator<Item = &'a str>,
    section: &str,
    report: &mut PlanReport,
) -> IndexSet<&'a str> {
    let mut seen = IndexSet::new();
    for name in names {
        if !seen.insert(name) {
            report.diagnostics.push(PlanDiagnostic::DuplicateDeclaration {
                section: section.to_string(),
                name: name.to_string(),
            });
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{CapabilityDecl, DelegationDecl};
    use pretty_assertions::assert_eq;

    fn base_plan() -> WiringPlan {
        WiringPlan::new()
            .with_capability(CapabilityDecl::new("AreaCalculator"))
            .with_capability(CapabilityDecl::new("PerimeterCalculator"))
            .with_provider("RectangleArea", &["AreaCalculator"])
            .with_provider("CircleArea", &["AreaCalculator"])
            .with_provider("RectanglePerimeter", &["PerimeterCalculator"])
            .with_context("Rect", &["AreaCalculator", "PerimeterCalculator"])
            .with_context("Square", &["PerimeterCalculator"])
    }

    fn valid_plan() -> WiringPlan {
        base_plan()
            .with_delegation(DelegationDecl::new("Rect", "AreaCalculator", "RectangleArea"))
            .with_delegation(DelegationDecl::new(
                "Rect",
                "PerimeterCalculator",
                "RectanglePerimeter",
            ))
            .with_delegation(DelegationDecl::new(
                "Square",
                "PerimeterCalculator",
                "RectanglePerimeter",
            ))
    }

    #[test]
    fn valid_plan_resolves_entries_in_order() {
        let report = PlanValidator::new().validate(&valid_plan());
        assert!(report.is_valid(), "{}", report.generate_text());
        assert_eq!(
            report.entries,
            vec![
                DelegationEntry::new("Rect", "AreaCalculatorComponent", "RectangleArea"),
                DelegationEntry::new("Rect", "PerimeterCalculatorComponent", "RectanglePerimeter"),
                DelegationEntry::new("Square", "PerimeterCalculatorComponent", "RectanglePerimeter"),
            ]
        );
        assert_eq!(report.entries_for("Rect").count(), 2);
    }

    #[test]
    fn identical_delegations_collapse() {
        let plan = valid_plan()
            .with_delegation(DelegationDecl::new("Rect", "AreaCalculator", "RectangleArea"));
        let report = PlanValidator::new().validate(&plan);
        assert!(report.is_valid());
        assert_eq!(report.collapsed, 1);
        assert_eq!(report.entries.len(), 3);
    }

    #[test]
    fn different_provider_conflicts() {
        let plan =
            valid_plan().with_delegation(DelegationDecl::new("Rect", "AreaCalculator", "CircleArea"));
        let report = PlanValidator::new().validate(&plan);
        assert_eq!(
            report.diagnostics,
            vec![PlanDiagnostic::ConflictingDelegation {
                context: "Rect".to_string(),
                capability: "AreaCalculator".to_string(),
                existing: "RectangleArea".to_string(),
                attempted: "CircleArea".to_string(),
            }]
        );
        // first choice is kept
        assert!(report
            .entries
            .contains(&DelegationEntry::new("Rect", "AreaCalculatorComponent", "RectangleArea")));
    }

    #[test]
    fn missing_delegation_is_reported() {
        let plan = base_plan()
            .with_delegation(DelegationDecl::new("Rect", "AreaCalculator", "RectangleArea"));
        let report = PlanValidator::new().validate(&plan);
        assert_eq!(
            report.diagnostics,
            vec![
                PlanDiagnostic::MissingDelegation {
                    context: "Rect".to_string(),
                    capability: "PerimeterCalculator".to_string(),
                },
                PlanDiagnostic::MissingDelegation {
                    context: "Square".to_string(),
                    capability: "PerimeterCalculator".to_string(),
                },
            ]
        );
    }

    #[test]
    fn provider_mismatch_is_reported_once() {
        let plan = base_plan()
            .with_delegation(DelegationDecl::new("Rect", "AreaCalculator", "RectangleArea"))
            .with_delegation(DelegationDecl::new("Rect", "PerimeterCalculator", "CircleArea"))
            .with_delegation(DelegationDecl::new(
                "Square",
                "PerimeterCalculator",
                "RectanglePerimeter",
            ));
        let report = PlanValidator::new().validate(&plan);
        assert_eq!(
            report.diagnostics,
            vec![PlanDiagnostic::ProviderMismatch {
                context: "Rect".to_string(),
                capability: "PerimeterCalculator".to_string(),
                provider: "CircleArea".to_string(),
            }]
        );
    }

    #[test]
    fn unknown_names_are_all_collected() {
        let plan = base_plan()
            .with_context("Blob", &["Volume"])
            .with_delegation(DelegationDecl::new("Ghost", "Volume", "Nobody"));
        let report = PlanValidator::new().validate(&plan);
        let kinds: Vec<String> = report
            .diagnostics
            .iter()
            .map(|d| serde_json::to_value(d).unwrap()["kind"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "unknown_capability",
                "unknown_context",
                "unknown_capability",
                "unknown_provider",
                "missing_delegation",
                "missing_delegation",
                "missing_delegation",
            ]
        );
        assert!(!report.is_valid());
    }

    #[test]
    fn duplicate_declarations_are_reported() {
        let plan = valid_plan().with_provider("RectangleArea", &["AreaCalculator"]);
        let report = PlanValidator::new().validate(&plan);
        assert_eq!(
            report.diagnostics,
            vec![PlanDiagnostic::DuplicateDeclaration {
                section: "provider".to_string(),
                name: "RectangleArea".to_string(),
            }]
        );
    }

    #[test]
    fn duplicate_context_reports_missing_once() {
        let plan = base_plan()
            .with_context("Square", &["PerimeterCalculator"])
            .with_delegation(DelegationDecl::new("Rect", "AreaCalculator", "RectangleArea"))
            .with_delegation(DelegationDecl::new(
                "Rect",
                "PerimeterCalculator",
                "RectanglePerimeter",
            ));
        let report = PlanValidator::new().validate(&plan);
        assert_eq!(
            report.diagnostics,
            vec![
                PlanDiagnostic::DuplicateDeclaration {
                    section: "context".to_string(),
                    name: "Square".to_string(),
                },
                PlanDiagnostic::MissingDelegation {
                    context: "Square".to_string(),
                    capability: "PerimeterCalculator".to_string(),
                },
            ]
        );
    }

    #[test]
    fn strict_mode_rejects_unlisted_delegations() {
        let plan = valid_plan()
            .with_delegation(DelegationDecl::new("Square", "AreaCalculator", "RectangleArea"));
        assert!(PlanValidator::new().validate(&plan).is_valid());

        let report = PlanValidator::new().with_strict(true).validate(&plan);
        assert_eq!(
            report.diagnostics,
            vec![PlanDiagnostic::UndeclaredUse {
                context: "Square".to_string(),
                capability: "AreaCalculator".to_string(),
            }]
        );
    }

    #[test]
    fn diagnostics_name_context_and_capability() {
        let diagnostic = PlanDiagnostic::MissingDelegation {
            context: "Square".to_string(),
            capability: "AreaCalculator".to_string(),
        };
        let text = diagnostic.to_string();
        assert!(text.contains("Square"));
        assert!(text.contains("AreaCalculator"));
        assert_eq!(diagnostic.context(), Some("Square"));
    }

    #[test]
    fn validation_is_deterministic() {
        let plan = valid_plan()
            .with_delegation(DelegationDecl::new("Rect", "AreaCalculator", "CircleArea"));
        let validator = PlanValidator::new();
        assert_eq!(validator.validate(&plan), validator.validate(&plan));
    }
}
