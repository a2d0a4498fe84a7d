//! Inspector configuration
//!
//! Loaded from an optional TOML file; the log filter can be overridden with
//! the `WIRING_LOG` environment variable.

use crate::error::PlanError;
use crate::render::PlanRenderer;
use crate::validate::PlanValidator;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "WIRING_LOG";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Inspector configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// `tracing` filter directive, e.g. `info` or `wiring_inspect=debug`
    pub log_filter: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Reject delegations for capabilities a context does not list in `uses`
    pub strict: bool,
    /// Emit a generated-file header when rendering
    pub render_header: bool,
    /// Path `delegate_components!` is imported from in rendered source
    pub crate_path: String,
    /// Pretty-print JSON output
    pub pretty_json: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_format: LogFormat::Text,
            strict: false,
            render_header: true,
            crate_path: "wiring_core".to_string(),
            pretty_json: true,
        }
    }
}

impl InspectConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file; missing keys take defaults
    ///
    /// # Errors
    /// Returns [`PlanError::Io`] or [`PlanError::Parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Apply the `WIRING_LOG` override, if set and non-empty
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(LOG_ENV) {
            Ok(filter) => self.with_log_override(Some(filter)),
            Err(_) => self,
        }
    }

    /// Replace the log filter when `filter` holds a non-empty value
    #[must_use]
    pub fn with_log_override(mut self, filter: Option<String>) -> Self {
        if let Some(filter) = filter.filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// With log format
    #[inline]
    #[must_use]
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// With strict validation
    #[inline]
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// With the import path for rendered source
    #[inline]
    #[must_use]
    pub fn with_crate_path(mut self, crate_path: impl Into<String>) -> Self {
        self.crate_path = crate_path.into();
        self
    }

    /// With pretty or compact JSON
    #[inline]
    #[must_use]
    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    /// Validator configured from these settings
    #[must_use]
    pub fn validator(&self) -> PlanValidator {
        PlanValidator::new().with_strict(self.strict)
    }

    /// Renderer configured from these settings
    #[must_use]
    pub fn renderer(&self) -> PlanRenderer {
        PlanRenderer::new()
            .with_header(self.render_header)
            .with_crate_path(self.crate_path.clone())
    }

    /// Serialize a value as JSON using the configured style
    ///
    /// # Errors
    /// Returns [`PlanError::Render`] if serialization fails.
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String, PlanError> {
        let json = if self.pretty_json {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = InspectConfig::new();
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(!config.strict);
        assert!(config.render_header);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: InspectConfig = toml::from_str("strict = true\nlog_format = \"json\"").unwrap();
        assert!(config.strict);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.crate_path, "wiring_core");
    }

    #[test]
    fn log_override_ignores_blank_values() {
        let config = InspectConfig::new().with_log_override(Some("  ".to_string()));
        assert_eq!(config.log_filter, "info");

        let config = config.with_log_override(Some("debug".to_string()));
        assert_eq!(config.log_filter, "debug");

        let config = config.with_log_override(None);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn json_style_follows_setting() {
        let value = vec![1, 2];
        let compact = InspectConfig::new().with_pretty_json(false).to_json(&value).unwrap();
        assert_eq!(compact, "[1,2]");
        let pretty = InspectConfig::new().to_json(&value).unwrap();
        assert!(pretty.contains('\n'));
    }
}
