//! Layered configuration for `prt-inspect`.
//!
//! Precedence, lowest to highest: built-in defaults, TOML file, environment,
//! command-line flags.
//!
//! # Example
//!
//! ```toml
//! curve = "p256"
//!
//! [keys]
//! dir = "published_keys"
//!
//! [protocol]
//! padding_bits = 24
//! min_plaintext_len = 26
//!
//! [logging]
//! level = "info"
//! json = false
//! ```
//!
//! # Environment Variables
//!
//! - `PRT_KEY_DIR`: Directory holding `<epoch>.json` key files
//! - `PRT_KEY_URL`: Base URL serving `<epoch>.json` key files
//! - `PRT_LOG_LEVEL` or `RUST_LOG`: Log filter (default: warn)
//! - `PRT_JSON_LOGS`: Emit JSON logs (`true` or `1`)

use std::fs;
use std::path::{Path, PathBuf};

use prt_decoder::adapters::DEFAULT_KEY_URL;
use prt_decoder::{ConfigError, CurveKind, ProtocolConfig};
use serde::Deserialize;

/// Where key material comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Local directory of key files
    Dir(PathBuf),
    /// Base URL of published key files
    Url(String),
}

/// `[keys]` table. `dir` wins over `url` when a layer sets both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysConfig {
    pub dir: Option<PathBuf>,
    pub url: Option<String>,
}

impl KeysConfig {
    fn source(&self) -> Option<KeySource> {
        self.dir
            .clone()
            .map(KeySource::Dir)
            .or_else(|| self.url.clone().map(KeySource::Url))
    }
}

/// `[logging]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn` or `prt_decoder=debug`
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// Complete `prt-inspect` configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InspectConfig {
    /// Curve the tokens were issued on (`p256` or `secp256k1`)
    pub curve: CurveKind,
    pub keys: KeysConfig,
    pub protocol: ProtocolConfig,
    pub logging: LoggingConfig,
}

impl InspectConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `PRT_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Apply overrides using `lookup` to read variables.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.override_keys(
            lookup("PRT_KEY_DIR").map(PathBuf::from),
            lookup("PRT_KEY_URL"),
        );

        if let Some(level) = lookup("PRT_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            self.logging.level = level;
        }

        if let Some(json) = lookup("PRT_JSON_LOGS") {
            self.logging.json = json.eq_ignore_ascii_case("true") || json == "1";
        }
    }

    /// Replace the key source if either value is set.
    ///
    /// A higher layer naming any key source replaces the lower layer's
    /// choice entirely, so a flag `--key-url` beats a `dir` from the file.
    pub fn override_keys(&mut self, dir: Option<PathBuf>, url: Option<String>) {
        if dir.is_some() || url.is_some() {
            self.keys = KeysConfig { dir, url };
        }
    }

    /// Resolved key source, falling back to the published reference keys.
    pub fn key_source(&self) -> KeySource {
        self.keys
            .source()
            .unwrap_or_else(|| KeySource::Url(DEFAULT_KEY_URL.to_string()))
    }

    /// Validate values that the decoder would otherwise reject late.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.protocol.validate()?;
        if self.keys.url.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Invalid("keys.url must not be empty".to_string()));
        }
        Ok(())
    }
}
