//! Keyserver protocol authentication settings.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::ConfigResult;
use crate::secret::SecretBytes;
use crate::wire::{self, ScalarText};

const SECTION: &str = "keyserver";

/// Configuration for authenticating through a remote keyserver.
///
/// The intraservice key is only needed when the service does not run in its
/// combined single-process mode. That rule is enforced by whoever owns the
/// mode, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyserverConfig {
    /// Base URL of the keyserver.
    pub api: String,
    /// Service-to-service credential, decoded from base64.
    pub intraservice: SecretBytes,
}

#[derive(Deserialize)]
struct KeyserverWire {
    #[serde(default)]
    api: Option<ScalarText>,
    #[serde(default)]
    intraservice: Option<ScalarText>,
}

#[derive(Serialize)]
struct KeyserverWireRef<'a> {
    api: &'a str,
    intraservice: String,
}

impl KeyserverConfig {
    fn from_wire(wire: KeyserverWire) -> ConfigResult<Self> {
        let api = wire.api.map(ScalarText::into_string).unwrap_or_default();
        let intraservice = wire
            .intraservice
            .map(ScalarText::into_string)
            .unwrap_or_default();
        let intraservice = wire::decode_secret(SECTION, "intraservice", &intraservice)?;
        Ok(Self { api, intraservice })
    }
}

impl<'de> Deserialize<'de> for KeyserverConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed: Option<KeyserverWire> = wire::read_section(deserializer, SECTION)?;
        parsed.map_or_else(
            || Ok(Self::default()),
            |wire| Self::from_wire(wire).map_err(de::Error::custom),
        )
    }
}

impl Serialize for KeyserverConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        KeyserverWireRef {
            api: &self.api,
            intraservice: wire::encode_secret(&self.intraservice),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_intraservice_and_keeps_api() {
        let parsed: KeyserverConfig = serde_json::from_value(json!({
            "api": "https://ks.example",
            "intraservice": "dG9rZW4=",
        }))
        .expect("valid keyserver section");
        assert_eq!(parsed.api, "https://ks.example");
        assert_eq!(parsed.intraservice.expose(), b"token");
    }

    #[test]
    fn serializes_wire_shape() {
        let config = KeyserverConfig {
            api: "https://ks.example".to_string(),
            intraservice: SecretBytes::from(b"token".as_slice()),
        };
        let rendered = serde_json::to_string(&config).expect("serialize keyserver");
        assert_eq!(
            rendered,
            r#"{"api":"https://ks.example","intraservice":"dG9rZW4="}"#
        );
    }

    #[test]
    fn round_trips_api_and_credential() {
        let cases = [
            ("", Vec::new()),
            ("http://localhost:8080/", vec![0_u8, 1, 2, 254, 255]),
            ("keyserver.internal", b"a longer service credential".to_vec()),
        ];
        for (api, intraservice) in cases {
            let config = KeyserverConfig {
                api: api.to_string(),
                intraservice: SecretBytes::new(intraservice),
            };
            let text = serde_json::to_string(&config).expect("serialize keyserver");
            let back: KeyserverConfig = serde_json::from_str(&text).expect("deserialize keyserver");
            assert_eq!(back, config);
        }
    }

    #[test]
    fn empty_section_is_present_but_blank() {
        let parsed: KeyserverConfig = serde_json::from_value(json!({})).expect("empty section");
        assert!(parsed.api.is_empty());
        assert!(parsed.intraservice.is_empty());
    }

    #[test]
    fn invalid_base64_is_reported() {
        let err = serde_json::from_value::<KeyserverConfig>(json!({
            "api": "https://ks.example",
            "intraservice": "dG9rZW4",
        }))
        .unwrap_err();
        assert!(
            err.to_string()
                .contains("invalid base64 in keyserver.intraservice")
        );
    }

    #[test]
    fn numeric_scalars_are_read_as_text() {
        let parsed: KeyserverConfig =
            serde_json::from_value(json!({ "api": 8080, "intraservice": 12_345_678 }))
                .expect("numeric scalars are text");
        assert_eq!(parsed.api, "8080");
        assert_eq!(parsed.intraservice.len(), 6);
    }

    #[cfg(not(feature = "strict"))]
    #[test]
    fn malformed_structure_yields_empty_config() {
        let parsed: KeyserverConfig =
            serde_json::from_value(json!({ "api": ["https://ks.example"], "intraservice": "dG9rZW4=" }))
                .expect("structural errors are swallowed");
        assert_eq!(parsed, KeyserverConfig::default());
    }

    #[cfg(feature = "strict")]
    #[test]
    fn malformed_structure_is_rejected_in_strict_mode() {
        assert!(serde_json::from_value::<KeyserverConfig>(json!({ "api": { "url": "https://ks.example" } })).is_err());
    }
}
