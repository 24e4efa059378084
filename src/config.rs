//! Service configuration.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BUILDING_GRAPH_LOG` | `building_graph=info` |
//!
//! The store itself is injected as a `StorageBackend`; its connection
//! settings belong to whoever builds that backend.

use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, ParseError};

pub const LOG_FILTER_VAR: &str = "BUILDING_GRAPH_LOG";
pub const DEFAULT_LOG_FILTER: &str = "building_graph=info";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {var} directive {value:?}: {source}")]
    InvalidLogFilter {
        var: &'static str,
        value: String,
        #[source]
        source: ParseError,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// `tracing-subscriber` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { log_filter: DEFAULT_LOG_FILTER.to_owned() }
    }
}

impl ServiceConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(log_filter) = lookup(LOG_FILTER_VAR)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
        else {
            return Ok(Self::default());
        };

        EnvFilter::try_new(&log_filter).map_err(|source| ConfigError::InvalidLogFilter {
            var: LOG_FILTER_VAR,
            value: log_filter.clone(),
            source,
        })?;

        Ok(Self { log_filter })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        assert_eq!(ServiceConfig::from_lookup(lookup(&[])).unwrap(), ServiceConfig::default());

        let blank = ServiceConfig::from_lookup(lookup(&[("BUILDING_GRAPH_LOG", "   ")])).unwrap();
        assert_eq!(blank.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_override() {
        let config = ServiceConfig::from_lookup(lookup(&[(
            "BUILDING_GRAPH_LOG",
            " building_graph=debug,warn ",
        )]))
        .unwrap();
        assert_eq!(config.log_filter, "building_graph=debug,warn");
    }

    #[test]
    fn test_bad_directive_rejected() {
        let err = ServiceConfig::from_lookup(lookup(&[("BUILDING_GRAPH_LOG", "building_graph=loud")]))
            .unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::InvalidLogFilter { value, .. } if value == "building_graph=loud"
        ));
        assert!(err.to_string().starts_with("Invalid BUILDING_GRAPH_LOG directive"));
    }
}
