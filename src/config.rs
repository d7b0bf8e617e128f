//! Gateway configuration.
//!
//! TOML-deserializable settings for a client instance: which gateway host to
//! talk to and the namespace prefix its payment methods live under.

use serde::Deserialize;
use url::Url;

use crate::error::{MulpayError, Result};

/// Client instance configuration.
///
/// # Examples
///
/// ```
/// use mulpay::config::GatewayConfig;
///
/// let toml = r#"
///     host = "p01.mul-pay.jp"
/// "#;
///
/// let config: GatewayConfig = toml::from_str(toml).unwrap();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.api_prefix, "/payment");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway host, without scheme (e.g. `p01.mul-pay.jp`).
    pub host: String,

    /// Namespace prefix for relative method paths.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

impl GatewayConfig {
    /// Creates a configuration for `host` with the standard prefix.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into(), api_prefix: default_api_prefix() }
    }

    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`MulpayError::ConfigError`] if the TOML is invalid or the
    /// parsed configuration fails validation.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)
            .map_err(|e| MulpayError::ConfigError(format!("invalid gateway TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the host and prefix.
    ///
    /// The host must be a bare hostname (no scheme, no path); the prefix
    /// must start with `/` and contain no traversal sequences.
    ///
    /// # Errors
    ///
    /// Returns [`MulpayError::ConfigError`] for any violation.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(MulpayError::ConfigError("host cannot be empty".to_owned()));
        }
        if self.host.contains("://") || self.host.contains('/') {
            return Err(MulpayError::ConfigError(format!(
                "host must be a bare hostname, got: {}",
                self.host
            )));
        }
        // The host must round-trip through URL parsing with the https scheme
        // the client will prepend.
        let candidate = format!("https://{}", self.host);
        Url::parse(&candidate)
            .map_err(|e| MulpayError::ConfigError(format!("invalid host '{}': {e}", self.host)))?;

        validate_path_segment("api_prefix", &self.api_prefix)?;
        Ok(())
    }

    /// Builds the full URL for a namespaced path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("https://{}{path}", self.host)
    }

    /// Prefixes `path` with the namespace unless it is already absolute.
    #[must_use]
    pub fn namespaced_path(&self, path: &str) -> String {
        if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("{}/{path}", self.api_prefix)
        }
    }
}

/// Validates a configured path for traversal and prefix issues.
pub(crate) fn validate_path_segment(name: &str, path: &str) -> Result<()> {
    if path.contains("..") {
        return Err(MulpayError::ConfigError(format!(
            "{name} contains path traversal sequence '..': {path}"
        )));
    }
    if path.contains("//") {
        return Err(MulpayError::ConfigError(format!(
            "{name} contains double slash '//': {path}"
        )));
    }
    if !path.starts_with('/') {
        return Err(MulpayError::ConfigError(format!("{name} must start with '/': {path}")));
    }
    Ok(())
}

fn default_api_prefix() -> String {
    "/payment".to_owned()
}
