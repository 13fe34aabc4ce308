//! Transcoding helpers shared by the auth sections.
//!
//! # Design
//! - Each section parses into a private string-only wire struct first, then
//!   decodes its base64 fields into [`SecretBytes`].
//! - Wire string fields accept any scalar. An unquoted YAML `12345678` is
//!   still valid base64 and must reach the decoder as text.
//! - Structural failures of the wire struct are swallowed unless the `strict`
//!   feature is enabled: the section comes back with empty values. Base64
//!   failures always propagate.

use std::fmt;

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
#[cfg(not(feature = "strict"))]
use serde::de::IgnoredAny;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::secret::SecretBytes;

/// Standard padded alphabet that tolerates non-zero trailing bits.
const SECRET_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Text taken from any scalar in the document (string, number, bool, null).
#[allow(clippy::redundant_pub_crate)]
pub(crate) struct ScalarText(String);

impl ScalarText {
    #[allow(clippy::redundant_pub_crate)]
    pub(crate) fn into_string(self) -> String {
        self.0
    }
}

struct ScalarTextVisitor;

impl Visitor<'_> for ScalarTextVisitor {
    type Value = ScalarText;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a scalar value")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(ScalarText(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(ScalarText(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(ScalarText(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(ScalarText(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(ScalarText(value.to_string()))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(ScalarText(value.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ScalarText(String::new()))
    }
}

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarTextVisitor)
    }
}

/// Either the expected wire struct or anything else found in its place.
#[cfg(not(feature = "strict"))]
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<W> {
    Parsed(W),
    Malformed(IgnoredAny),
}

/// Parse a section's wire struct, returning `None` when the input has the
/// wrong shape.
#[cfg(not(feature = "strict"))]
#[allow(clippy::redundant_pub_crate)]
pub(crate) fn read_section<'de, D, W>(
    deserializer: D,
    section: &'static str,
) -> Result<Option<W>, D::Error>
where
    D: Deserializer<'de>,
    W: Deserialize<'de>,
{
    match Lenient::<W>::deserialize(deserializer)? {
        Lenient::Parsed(wire) => Ok(Some(wire)),
        Lenient::Malformed(IgnoredAny) => {
            warn!(section, "malformed auth section ignored; fields left empty");
            Ok(None)
        }
    }
}

/// Parse a section's wire struct, propagating structural errors.
#[cfg(feature = "strict")]
#[allow(clippy::redundant_pub_crate)]
pub(crate) fn read_section<'de, D, W>(
    deserializer: D,
    section: &'static str,
) -> Result<Option<W>, D::Error>
where
    D: Deserializer<'de>,
    W: Deserialize<'de>,
{
    // Serde errors can quote the offending value, so only the section is logged.
    W::deserialize(deserializer)
        .map(Some)
        .inspect_err(|_| warn!(section, "malformed auth section rejected"))
}

/// Decode a padded standard-alphabet base64 field. Line breaks are skipped.
#[allow(clippy::redundant_pub_crate)]
pub(crate) fn decode_secret(
    section: &'static str,
    field: &'static str,
    encoded: &str,
) -> ConfigResult<SecretBytes> {
    let compact: String = encoded
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n'))
        .collect();
    let bytes = SECRET_ENGINE
        .decode(compact)
        .map_err(|source| ConfigError::InvalidBase64 {
            section,
            field,
            source,
        })?;
    debug!(section, field, len = bytes.len(), "decoded secret field");
    Ok(SecretBytes::new(bytes))
}

#[allow(clippy::redundant_pub_crate)]
pub(crate) fn encode_secret(secret: &SecretBytes) -> String {
    SECRET_ENGINE.encode(secret.expose())
}
