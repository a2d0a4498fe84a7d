//! Error types for runtime delegation
//!
//! The static registry reports these conditions as build failures. The
//! dynamic registry and wiring plans report them as values.

/// Delegation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelegationError {
    /// No provider registered for the pair
    #[error("no provider registered for component `{component}` in context `{context}`")]
    MissingResolution {
        /// Context type name
        context: String,
        /// Component type name
        component: String,
    },

    /// A different provider is already registered for the pair
    #[error(
        "conflicting providers for component `{component}` in context `{context}`: \
         `{existing}` is registered, `{attempted}` was requested"
    )]
    ConflictingResolution {
        /// Context type name
        context: String,
        /// Component type name
        component: String,
        /// Provider already registered
        existing: String,
        /// Provider that was rejected
        attempted: String,
    },

    /// The registered handler has a different argument or output type
    #[error("handler for component `{component}` in context `{context}` is not `{expected}`")]
    SignatureMismatch {
        /// Context type name
        context: String,
        /// Component type name
        component: String,
        /// Handler signature the caller asked for
        expected: String,
    },
}

impl DelegationError {
    /// Create missing resolution error
    #[inline]
    #[must_use]
    pub fn missing(context: impl Into<String>, component: impl Into<String>) -> Self {
        Self::MissingResolution {
            context: context.into(),
            component: component.into(),
        }
    }

    /// Create conflicting resolution error
    #[inline]
    #[must_use]
    pub fn conflict(
        context: impl Into<String>,
        component: impl Into<String>,
        existing: impl Into<String>,
        attempted: impl Into<String>,
    ) -> Self {
        Self::ConflictingResolution {
            context: context.into(),
            component: component.into(),
            existing: existing.into(),
            attempted: attempted.into(),
        }
    }

    /// Check if this is a missing resolution
    #[inline]
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingResolution { .. })
    }

    /// Check if this is a conflicting resolution
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConflictingResolution { .. })
    }

    /// Context named by the error
    #[must_use]
    pub fn context(&self) -> &str {
        match self {
            Self::MissingResolution { context, .. }
            | Self::ConflictingResolution { context, .. }
            | Self::SignatureMismatch { context, .. } => context,
        }
    }

    /// Component named by the error
    #[must_use]
    pub fn component(&self) -> &str {
        match self {
            Self::MissingResolution { component, .. }
            | Self::ConflictingResolution { component, .. }
            | Self::SignatureMismatch { component, .. } => component,
        }
    }
}
