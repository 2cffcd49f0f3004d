use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_REGISTRY_BUFFER: usize = 64;
const DEFAULT_SEGMENT_BUFFER: usize = 64;
const DEFAULT_SEGMENT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tunables for an [`crate::app_system::OfferSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferSystemConfig {
    /// Pending inserts the registry actor queues before callers wait.
    pub registry_buffer: usize,
    pub segment_buffer: usize,
    /// Upper bound on a single segment lookup during checkout.
    pub segment_lookup_timeout: Duration,
}

impl Default for OfferSystemConfig {
    fn default() -> Self {
        Self {
            registry_buffer: DEFAULT_REGISTRY_BUFFER,
            segment_buffer: DEFAULT_SEGMENT_BUFFER,
            segment_lookup_timeout: DEFAULT_SEGMENT_LOOKUP_TIMEOUT,
        }
    }
}

impl OfferSystemConfig {
    /// Defaults with environment overrides applied, then validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry_buffer == 0 {
            return Err(ConfigError::Invalid("registry_buffer must be greater than 0".into()));
        }
        if self.segment_buffer == 0 {
            return Err(ConfigError::Invalid("segment_buffer must be greater than 0".into()));
        }
        if self.segment_lookup_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "segment_lookup_timeout must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(buffer) = parse_var(&lookup, "OFFER_REGISTRY_BUFFER") {
            debug!(buffer, "Overriding registry buffer from environment");
            self.registry_buffer = buffer;
        }
        if let Some(buffer) = parse_var(&lookup, "SEGMENT_DIRECTORY_BUFFER") {
            debug!(buffer, "Overriding segment buffer from environment");
            self.segment_buffer = buffer;
        }
        if let Some(millis) = parse_var::<u64>(&lookup, "SEGMENT_LOOKUP_TIMEOUT_MS") {
            debug!(millis, "Overriding segment lookup timeout from environment");
            self.segment_lookup_timeout = Duration::from_millis(millis);
        }
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = %raw, "Ignoring unparsable environment override");
            None
        }
    }
}
