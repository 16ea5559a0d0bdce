//! # Node Configuration
//!
//! Contract and logging configuration with environment overrides.
//!
//! | Variable | Field | Values |
//! |----------|-------|--------|
//! | `CUSTODY_ENFORCE_ORG` | `custody.enforce_org_identity` | `true`/`false`/`1`/`0` |
//! | `CUSTODY_MANUFACTURER_ORG` | `custody.manufacturer_org` | org id |
//! | `CUSTODY_DEALER_ORG` | `custody.dealer_org` | org id |
//! | `RUST_LOG` | `log_filter` | `tracing_subscriber::EnvFilter` directives |
//!
//! Invalid values are ignored and reported back to the caller, which logs
//! them once the subscriber is installed.

use custody_lifecycle::service::CustodyConfig;
use thiserror::Error;

/// Enables the invoker organization check.
pub const ENFORCE_ORG_ENV: &str = "CUSTODY_ENFORCE_ORG";
/// Overrides the manufacturer organization id.
pub const MANUFACTURER_ORG_ENV: &str = "CUSTODY_MANUFACTURER_ORG";
/// Overrides the dealer organization id.
pub const DEALER_ORG_ENV: &str = "CUSTODY_DEALER_ORG";
/// Log filter directives.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Contract configuration.
    pub custody: CustodyConfig,
    /// `EnvFilter` directives for the log subscriber.
    pub log_filter: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            custody: CustodyConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An organization id is empty while the org check is on.
    #[error("{0} must not be empty when organization identity is enforced")]
    EmptyOrg(&'static str),
}

/// An environment override that was set but could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredOverride {
    /// Variable name.
    pub variable: &'static str,
    /// Value found.
    pub value: String,
}

impl NodeConfig {
    /// Loads the defaults with overrides from the process environment.
    #[must_use]
    pub fn from_env() -> (Self, Vec<IgnoredOverride>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the defaults with overrides from `lookup`.
    ///
    /// Does not log: it runs before the subscriber exists. Overrides that
    /// could not be used are returned for the caller to report.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<IgnoredOverride>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut ignored = Vec::new();

        if let Some(value) = lookup(ENFORCE_ORG_ENV) {
            match parse_flag(&value) {
                Some(flag) => config.custody.enforce_org_identity = flag,
                None => ignored.push(IgnoredOverride {
                    variable: ENFORCE_ORG_ENV,
                    value,
                }),
            }
        }

        if let Some(org) = lookup(MANUFACTURER_ORG_ENV) {
            config.custody.manufacturer_org = org.trim().to_string();
        }
        if let Some(org) = lookup(DEALER_ORG_ENV) {
            config.custody.dealer_org = org.trim().to_string();
        }

        if let Some(filter) = lookup(LOG_FILTER_ENV) {
            if filter.trim().is_empty() {
                ignored.push(IgnoredOverride {
                    variable: LOG_FILTER_ENV,
                    value: filter,
                });
            } else {
                config.log_filter = filter;
            }
        }

        (config, ignored)
    }

    /// Rejects configurations the contract cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.custody.enforce_org_identity {
            if self.custody.manufacturer_org.is_empty() {
                return Err(ConfigError::EmptyOrg(MANUFACTURER_ORG_ENV));
            }
            if self.custody.dealer_org.is_empty() {
                return Err(ConfigError::EmptyOrg(DEALER_ORG_ENV));
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
