//! Delegation entry records
//!
//! Runtime description of a `(Context, Component) -> Provider` entry, shared by
//! [`describe`](crate::describe), the dynamic registry and wiring plans.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(context, component) -> provider` entry described by type names
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DelegationEntry {
    /// Context type name
    pub context: String,

    /// Component (capability) type name
    pub component: String,

    /// Provider type name
    pub provider: String,
}

impl DelegationEntry {
    /// Create a new entry
    #[inline]
    #[must_use]
    pub fn new(
        context: impl Into<String>,
        component: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            component: component.into(),
            provider: provider.into(),
        }
    }

    /// Same entry with module paths stripped from every name
    #[must_use]
    pub fn short(&self) -> Self {
        Self {
            context: short_type_name(&self.context),
            component: short_type_name(&self.component),
            provider: short_type_name(&self.provider),
        }
    }

    /// Check whether this entry is for the given pair
    #[inline]
    #[must_use]
    pub fn is_for(&self, context: &str, component: &str) -> bool {
        self.context == context && self.component == component
    }
}

impl fmt::Display for DelegationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} -> {}", self.context, self.component, self.provider)
    }
}

/// Strip module paths from a type name, including inside generic arguments.
///
/// `my_crate::shapes::Scaled<my_crate::shapes::RectangleArea>` becomes
/// `Scaled<RectangleArea>`.
#[must_use]
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                segment.clear();
            }
            c if c.is_alphanumeric() || c == '_' => segment.push(c),
            other => {
                out.push_str(&segment);
                segment.clear();
                out.push(other);
            }
        }
    }
    out.push_str(&segment);
    out
}
