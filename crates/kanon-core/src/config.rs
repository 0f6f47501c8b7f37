//! Module: config
//! Responsibility: per-aggregation configuration and its TOML surface.
//! Does not own: runtime state; a config only builds identifiers and tables.
//! Boundary: every partition of one logical aggregation must share one config.

use crate::{
    accumulator::{FrequencyTable, GroupLimits},
    identity::{HashAlgorithm, RowIdentifier, SignatureLayout},
    value::DEFAULT_NULL_TOKEN,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Default ceiling for one transported partial state.
pub const DEFAULT_MAX_PARTIAL_BYTES: usize = 64 * 1024 * 1024;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

///
/// KAnonymityConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct KAnonymityConfig {
    pub algorithm: HashAlgorithm,
    pub layout: SignatureLayout,
    pub null_token: String,

    /// Fixed column count. Inferred from the first row when absent.
    pub arity: Option<usize>,

    pub limits: LimitsConfig,
}

impl Default for KAnonymityConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            layout: SignatureLayout::default(),
            null_token: DEFAULT_NULL_TOKEN.to_string(),
            arity: None,
            limits: LimitsConfig::default(),
        }
    }
}

impl KAnonymityConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arity == Some(0) {
            return Err(ConfigError::Invalid {
                field: "arity",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.limits.max_groups == Some(0) {
            return Err(ConfigError::Invalid {
                field: "limits.max_groups",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.limits.max_partial_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "limits.max_partial_bytes",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Identifier described by this config.
    #[must_use]
    pub fn build_identifier(&self) -> RowIdentifier {
        RowIdentifier::from_algorithm(self.algorithm)
            .with_layout(self.layout)
            .with_null_token(self.null_token.clone())
    }

    /// Empty frequency table described by this config.
    #[must_use]
    pub fn build_table(&self) -> FrequencyTable {
        self.table_with(self.build_identifier())
    }

    /// Empty frequency table around an injected identifier, keeping this
    /// config's arity and limits.
    #[must_use]
    pub fn table_with(&self, identifier: RowIdentifier) -> FrequencyTable {
        FrequencyTable::new(identifier, self.arity).with_limits(self.limits.group_limits())
    }
}

///
/// LimitsConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub max_groups: Option<u64>,
    pub max_partial_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_groups: None,
            max_partial_bytes: DEFAULT_MAX_PARTIAL_BYTES,
        }
    }
}

impl LimitsConfig {
    #[must_use]
    pub const fn group_limits(&self) -> GroupLimits {
        match self.max_groups {
            Some(max_groups) => GroupLimits::with_max_groups(max_groups),
            None => GroupLimits::unbounded(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = KAnonymityConfig::from_toml_str("").expect("empty config should parse");

        assert_eq!(config, KAnonymityConfig::default());
        assert_eq!(config.algorithm, HashAlgorithm::NameUuid);
        assert_eq!(config.layout, SignatureLayout::LengthPrefixed);
        assert_eq!(config.null_token, "null");
    }

    #[test]
    fn full_document_parses() {
        let config = KAnonymityConfig::from_toml_str(
            r#"
            algorithm = "sha256"
            layout = "concatenated"
            null_token = ""
            arity = 3

            [limits]
            max_groups = 1000
            max_partial_bytes = 4096
            "#,
        )
        .expect("full config should parse");

        assert_eq!(config.algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.layout, SignatureLayout::Concatenated);
        assert_eq!(config.null_token, "");
        assert_eq!(config.arity, Some(3));
        assert_eq!(config.limits.group_limits().max_groups(), 1000);
        assert_eq!(config.limits.max_partial_bytes, 4096);

        let identifier = config.build_identifier();
        assert_eq!(identifier.strategy_name(), "sha256");
        assert_eq!(identifier.layout(), SignatureLayout::Concatenated);
    }

    #[test]
    fn unknown_algorithm_is_a_parse_error() {
        let err = KAnonymityConfig::from_toml_str(r#"algorithm = "crc32""#)
            .expect_err("unknown algorithm must fail");

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = KAnonymityConfig::from_toml_str("hash = \"md5\"")
            .expect_err("unknown field must fail");

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_arity_is_invalid() {
        let err = KAnonymityConfig::from_toml_str("arity = 0").expect_err("zero arity must fail");

        assert!(matches!(err, ConfigError::Invalid { field: "arity", .. }));
    }

    #[test]
    fn zero_group_limit_is_invalid() {
        let err = KAnonymityConfig::from_toml_str("[limits]\nmax_groups = 0")
            .expect_err("zero group limit must fail");

        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "limits.max_groups",
                ..
            }
        ));
    }
}
