//! Pre-shared key authentication settings.
//!
//! In documents the key is carried as base64 text:
//!
//! ```yaml
//! psk:
//!   key: c2VjcmV0
//!   iss: ["clair"]
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::ConfigResult;
use crate::secret::SecretBytes;
use crate::wire::{self, ScalarText};

const SECTION: &str = "psk";

/// Configuration for pre-shared key based authentication.
///
/// `issuer` lists the values the service accepts as the token's "issuer"
/// claim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PskConfig {
    /// Shared secret, decoded from base64.
    pub key: SecretBytes,
    /// Accepted issuer claim values, in document order.
    pub issuer: Vec<String>,
}

#[derive(Deserialize)]
struct PskWire {
    #[serde(default)]
    key: Option<ScalarText>,
    #[serde(default, rename = "iss")]
    issuer: Option<Vec<ScalarText>>,
}

#[derive(Serialize)]
struct PskWireRef<'a> {
    key: String,
    #[serde(rename = "iss")]
    issuer: &'a [String],
}

impl PskConfig {
    fn from_wire(wire: PskWire) -> ConfigResult<Self> {
        let issuer = wire
            .issuer
            .unwrap_or_default()
            .into_iter()
            .map(ScalarText::into_string)
            .collect();
        let key = wire.key.map(ScalarText::into_string).unwrap_or_default();
        let key = wire::decode_secret(SECTION, "key", &key)?;
        Ok(Self { key, issuer })
    }
}

impl<'de> Deserialize<'de> for PskConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed: Option<PskWire> = wire::read_section(deserializer, SECTION)?;
        parsed.map_or_else(
            || Ok(Self::default()),
            |wire| Self::from_wire(wire).map_err(de::Error::custom),
        )
    }
}

impl Serialize for PskConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        PskWireRef {
            key: wire::encode_secret(&self.key),
            issuer: &self.issuer,
        }
        .serialize(serializer)
    }
}
