//! Wiring plan model
//!
//! A plan declares capabilities, providers, contexts and the delegations
//! between them, in TOML:
//!
//! ```toml
//! [[capability]]
//! name = "AreaCalculator"
//!
//! [[provider]]
//! name = "RectangleArea"
//! implements = ["AreaCalculator"]
//!
//! [[context]]
//! name = "Rect"
//! uses = ["AreaCalculator"]
//!
//! [[delegation]]
//! context = "Rect"
//! capability = "AreaCalculator"
//! provider = "RectangleArea"
//! ```

use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A declared capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDecl {
    /// Capability name, usually the provider trait name
    pub name: String,

    /// Component marker type; defaults to `{name}Component`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl CapabilityDecl {
    /// Create a capability with the default component name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            component: None,
        }
    }

    /// With an explicit component marker name
    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Component marker type name
    #[must_use]
    pub fn component_name(&self) -> String {
        self.component
            .clone()
            .unwrap_or_else(|| format!("{}Component", self.name))
    }
}

/// A declared provider and the capabilities it implements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDecl {
    /// Provider type name
    pub name: String,

    /// Capability names this provider implements
    #[serde(default)]
    pub implements: Vec<String>,
}

impl ProviderDecl {
    /// Check whether the provider declares `capability`
    #[inline]
    #[must_use]
    pub fn implements(&self, capability: &str) -> bool {
        self.implements.iter().any(|name| name == capability)
    }
}

/// A declared context and the capabilities it must be able to use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextDecl {
    /// Context type name
    pub name: String,

    /// Capabilities that must have a delegation
    #[serde(default)]
    pub uses: Vec<String>,
}

/// One `(context, capability) -> provider` choice
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DelegationDecl {
    /// Context name
    pub context: String,

    /// Capability name
    pub capability: String,

    /// Provider name
    pub provider: String,
}

impl DelegationDecl {
    /// Create a delegation
    #[must_use]
    pub fn new(
        context: impl Into<String>,
        capability: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            capability: capability.into(),
            provider: provider.into(),
        }
    }
}

/// Complete wiring plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiringPlan {
    /// Declared capabilities
    #[serde(default, rename = "capability")]
    pub capabilities: Vec<CapabilityDecl>,

    /// Declared providers
    #[serde(default, rename = "provider")]
    pub providers: Vec<ProviderDecl>,

    /// Declared contexts
    #[serde(default, rename = "context")]
    pub contexts: Vec<ContextDecl>,

    /// Delegations, in declaration order
    #[serde(default, rename = "delegation")]
    pub delegations: Vec<DelegationDecl>,
}

impl WiringPlan {
    /// Create empty plan
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a plan from TOML text
    ///
    /// # Errors
    /// Returns [`PlanError::Parse`] if the text is not a valid plan.
    pub fn from_toml_str(text: &str) -> Result<Self, PlanError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a plan file
    ///
    /// # Errors
    /// Returns [`PlanError::Io`] if the file cannot be read and
    /// [`PlanError::Parse`] if it is not a valid plan.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let plan = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            contexts = plan.contexts.len(),
            delegations = plan.delegations.len(),
            "plan loaded"
        );
        Ok(plan)
    }

    /// Serialize back to TOML
    ///
    /// # Errors
    /// Returns [`PlanError::Render`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, PlanError> {
        toml::to_string(self).map_err(|e| PlanError::Render(e.to_string()))
    }

    /// Look up a capability by name
    #[must_use]
    pub fn capability(&self, name: &str) -> Option<&CapabilityDecl> {
        self.capabilities.iter().find(|decl| decl.name == name)
    }

    /// Look up a provider by name
    #[must_use]
    pub fn provider(&self, name: &str) -> Option<&ProviderDecl> {
        self.providers.iter().find(|decl| decl.name == name)
    }

    /// Look up a context by name
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&ContextDecl> {
        self.contexts.iter().find(|decl| decl.name == name)
    }

    /// With a capability
    #[must_use]
    pub fn with_capability(mut self, capability: CapabilityDecl) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// With a provider implementing the listed capabilities
    #[must_use]
    pub fn with_provider(mut self, name: impl Into<String>, implements: &[&str]) -> Self {
        self.providers.push(ProviderDecl {
            name: name.into(),
            implements: implements.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// With a context using the listed capabilities
    #[must_use]
    pub fn with_context(mut self, name: impl Into<String>, uses: &[&str]) -> Self {
        self.contexts.push(ContextDecl {
            name: name.into(),
            uses: uses.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// With a delegation
    #[must_use]
    pub fn with_delegation(mut self, delegation: DelegationDecl) -> Self {
        self.delegations.push(delegation);
        self
    }
}
