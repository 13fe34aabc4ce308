//! Aggregate of the supported authentication methods.
//!
//! # Design
//! - Each method is an `Option`: `None` means the method was not mentioned in
//!   the document, `Some` with empty fields means it was mentioned but left
//!   blank. Callers decide which of those is an error.
//! - Both methods may be configured at once; picking one is up to the caller.

use serde::{Deserialize, Serialize};

use crate::keyserver::KeyserverConfig;
use crate::psk::PskConfig;

/// Authentication settings for the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Pre-shared key authentication, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psk: Option<PskConfig>,
    /// Keyserver protocol authentication, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyserver: Option<KeyserverConfig>,
}

/// Authentication mechanism present in an [`AuthConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Pre-shared key.
    Psk,
    /// Keyserver protocol.
    Keyserver,
}

impl AuthMethod {
    /// Render the method as its document key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Psk => "psk",
            Self::Keyserver => "keyserver",
        }
    }
}

impl AuthConfig {
    /// Whether any authentication method is configured.
    ///
    /// Presence decides, not content: an empty `psk` section still counts.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.psk.is_some() || self.keyserver.is_some()
    }

    /// Configured methods in document order.
    #[must_use]
    pub fn methods(&self) -> Vec<AuthMethod> {
        let mut methods = Vec::with_capacity(2);
        if self.psk.is_some() {
            methods.push(AuthMethod::Psk);
        }
        if self.keyserver.is_some() {
            methods.push(AuthMethod::Keyserver);
        }
        methods
    }
}
