#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Authentication section of the service configuration document.
//!
//! Layout: `auth.rs` (`AuthConfig` aggregate), `psk.rs` and `keyserver.rs`
//! (per-method configs with their base64 wire adapters), `secret.rs`
//! (redacting byte container), `wire.rs` (shared transcoding helpers).

pub mod auth;
pub mod error;
pub mod keyserver;
pub mod psk;
pub mod secret;
mod wire;

pub use auth::{AuthConfig, AuthMethod};
pub use error::{ConfigError, ConfigResult};
pub use keyserver::KeyserverConfig;
pub use psk::PskConfig;
pub use secret::SecretBytes;
