//! Error types for configuration decoding.

use thiserror::Error;

/// Primary error type for configuration decoding.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A byte-valued field did not hold valid padded standard base64.
    #[error("invalid base64 in {section}.{field}: {source}")]
    InvalidBase64 {
        /// Section containing the field (`psk`, `keyserver`).
        section: &'static str,
        /// Name of the offending field as it appears in the document.
        field: &'static str,
        /// Underlying decoder error.
        source: base64::DecodeError,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
