//! # Adapters Layer
//!
//! Key provider implementations for the `EpochKeyProvider` port.
//!
//! | Adapter | Source | Feature |
//! |---------|--------|---------|
//! | `StaticKeyProvider` | In-memory map | always |
//! | `FileKeyProvider` | `<dir>/<epoch>.json` | always |
//! | `HttpKeyProvider` | `<base_url>/<epoch>.json` | `http` |

pub mod file_keys;
#[cfg(feature = "http")]
pub mod http_keys;
pub mod key_file;
pub mod static_keys;

pub use file_keys::FileKeyProvider;
#[cfg(feature = "http")]
pub use http_keys::{HttpKeyProvider, DEFAULT_KEY_URL};
pub use key_file::KeyFile;
pub use static_keys::StaticKeyProvider;

/// Whether `epoch` only uses the URL-safe base64 alphabet.
///
/// Guards adapters that build a path or URL from the encoding.
pub(crate) fn is_epoch_encoding(epoch: &str) -> bool {
    !epoch.is_empty()
        && epoch
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
