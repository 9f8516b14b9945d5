//! Codec configuration.
//!
//! ```toml
//! unknown_keys = "drop"          # or "reject"
//! timestamp_encoding = "rfc3339" # or "unix_millis"
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid codec config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// UnknownKeys
///
/// What happens to keys in a value that no field of the target node claims.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Dropped without error. Lets callers pass a full client payload to an
    /// insert shape and keep only what the shape declares.
    #[default]
    Drop,

    /// Reported as `CodecErrorKind::UnknownField`.
    Reject,
}

///
/// TimestampEncoding
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampEncoding {
    #[default]
    Rfc3339,
    UnixMillis,
}

///
/// CodecConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    pub unknown_keys: UnknownKeys,
    pub timestamp_encoding: TimestampEncoding,
}

impl CodecConfig {
    /// Default config with unknown keys rejected.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            unknown_keys: UnknownKeys::Reject,
            timestamp_encoding: TimestampEncoding::Rfc3339,
        }
    }

    #[must_use]
    pub const fn with_timestamp_encoding(mut self, encoding: TimestampEncoding) -> Self {
        self.timestamp_encoding = encoding;
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = CodecConfig::from_toml_str("").unwrap();

        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.unknown_keys, UnknownKeys::Drop);
        assert_eq!(config.timestamp_encoding, TimestampEncoding::Rfc3339);
    }

    #[test]
    fn parses_every_setting() {
        let config = CodecConfig::from_toml_str(
            r#"
            unknown_keys = "reject"
            timestamp_encoding = "unix_millis"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            CodecConfig::strict().with_timestamp_encoding(TimestampEncoding::UnixMillis)
        );
    }

    #[test]
    fn rejects_unknown_settings_and_values() {
        assert!(CodecConfig::from_toml_str("strict = true").is_err());

        let err = CodecConfig::from_toml_str(r#"unknown_keys = "ignore""#).unwrap_err();
        assert!(err.to_string().starts_with("invalid codec config"));
    }
}
