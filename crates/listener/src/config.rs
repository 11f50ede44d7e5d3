//! Ingestion configuration.
//!
//! [`IngestConfig`] carries the process-wide settings every delivery is checked
//! against. It is passed explicitly into [`crate::WebhookIngestor`]; nothing in
//! the workspace reads ambient global state.

use intake::{AgentName, IntakeError, DEFAULT_MAX_AGE_SECONDS};
use serde::Deserialize;

/// Environment variable holding the shared webhook secret.
pub const ENV_WEBHOOK_SECRET: &str = "INTAKE_WEBHOOK_SECRET";
/// Environment variable holding the agent name mentions are matched against.
pub const ENV_AGENT_NAME: &str = "INTAKE_AGENT_NAME";
/// Environment variable overriding the freshness window (seconds).
pub const ENV_MAX_TIMESTAMP_AGE_SECONDS: &str = "INTAKE_MAX_TIMESTAMP_AGE_SECONDS";
/// Environment variable toggling the freshness check.
pub const ENV_REQUIRE_FRESH_TIMESTAMP: &str = "INTAKE_REQUIRE_FRESH_TIMESTAMP";

/// Settings applied to every inbound delivery.
///
/// Hosts may embed this in their own configuration file (it implements
/// [`Deserialize`] with defaults for the optional fields) or load it from the
/// environment with [`IngestConfig::from_env`].
///
/// # Security
///
/// The secret is excluded from `Debug` output.
#[derive(Clone, Deserialize)]
pub struct IngestConfig {
    /// Shared HMAC secret configured on the provider's webhook.
    pub webhook_secret: String,

    /// Bot identity used for `@` mention detection.
    pub agent_name: AgentName,

    /// Maximum distance between `webhookTimestamp` and now.
    #[serde(default = "default_max_timestamp_age_seconds")]
    pub max_timestamp_age_seconds: u64,

    /// Reject deliveries whose timestamp is missing or outside the window.
    #[serde(default = "default_require_fresh_timestamp")]
    pub require_fresh_timestamp: bool,
}

fn default_max_timestamp_age_seconds() -> u64 {
    DEFAULT_MAX_AGE_SECONDS
}

fn default_require_fresh_timestamp() -> bool {
    true
}

impl std::fmt::Debug for IngestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestConfig")
            .field("webhook_secret", &"<REDACTED>")
            .field("agent_name", &self.agent_name)
            .field("max_timestamp_age_seconds", &self.max_timestamp_age_seconds)
            .field("require_fresh_timestamp", &self.require_fresh_timestamp)
            .finish()
    }
}

impl IngestConfig {
    /// Creates a configuration with the default freshness policy.
    pub fn new(webhook_secret: impl Into<String>, agent_name: AgentName) -> Self {
        Self {
            webhook_secret: webhook_secret.into(),
            agent_name,
            max_timestamp_age_seconds: DEFAULT_MAX_AGE_SECONDS,
            require_fresh_timestamp: true,
        }
    }

    /// Overrides the freshness window.
    #[must_use]
    pub fn with_max_timestamp_age_seconds(mut self, seconds: u64) -> Self {
        self.max_timestamp_age_seconds = seconds;
        self
    }

    /// Enables or disables the freshness check.
    #[must_use]
    pub fn with_require_fresh_timestamp(mut self, require: bool) -> Self {
        self.require_fresh_timestamp = require;
        self
    }

    /// Checks the configuration for values that would make every delivery fail.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::ConfigurationError`] when the secret or agent name
    /// is blank, or when the freshness check is enabled with a zero window.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.webhook_secret.trim().is_empty() {
            return Err(IntakeError::ConfigurationError {
                message: "webhook secret must not be empty".to_string(),
            });
        }
        if self.agent_name.as_str().trim().is_empty() {
            return Err(IntakeError::ConfigurationError {
                message: "agent name must not be blank".to_string(),
            });
        }
        if self.require_fresh_timestamp && self.max_timestamp_age_seconds == 0 {
            return Err(IntakeError::ConfigurationError {
                message: "timestamp age window must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Loads and validates the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// See [`IngestConfig::from_lookup`].
    pub fn from_env() -> Result<Self, IntakeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads and validates the configuration through `lookup`.
    ///
    /// `INTAKE_WEBHOOK_SECRET` and `INTAKE_AGENT_NAME` are required;
    /// `INTAKE_MAX_TIMESTAMP_AGE_SECONDS` and `INTAKE_REQUIRE_FRESH_TIMESTAMP`
    /// fall back to their defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::ConfigurationError`] for a missing required value,
    /// an unparseable optional value, or a configuration that fails
    /// [`IngestConfig::validate`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IntakeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| IntakeError::ConfigurationError {
                    message: format!("{key} is not set"),
                })
        };

        let webhook_secret = required(ENV_WEBHOOK_SECRET)?;
        let agent_name = AgentName::new(required(ENV_AGENT_NAME)?.trim()).ok_or_else(|| {
            IntakeError::ConfigurationError {
                message: format!("{ENV_AGENT_NAME} is not set"),
            }
        })?;

        let mut config = Self::new(webhook_secret, agent_name);

        if let Some(raw) = lookup(ENV_MAX_TIMESTAMP_AGE_SECONDS) {
            config.max_timestamp_age_seconds =
                raw.trim()
                    .parse()
                    .map_err(|_| IntakeError::ConfigurationError {
                        message: format!(
                            "{ENV_MAX_TIMESTAMP_AGE_SECONDS} must be a non-negative integer, got '{raw}'"
                        ),
                    })?;
        }

        if let Some(raw) = lookup(ENV_REQUIRE_FRESH_TIMESTAMP) {
            config.require_fresh_timestamp =
                parse_flag(&raw).ok_or_else(|| IntakeError::ConfigurationError {
                    message: format!(
                        "{ENV_REQUIRE_FRESH_TIMESTAMP} must be true or false, got '{raw}'"
                    ),
                })?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
