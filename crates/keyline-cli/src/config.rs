// ABOUTME: Configuration loading and management for the keyline CLI
// ABOUTME: Supports TOML config files with sensible defaults

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output formatting for converted keys
    pub output: OutputConfig,
    /// Fingerprint rendering
    pub fingerprint: FingerprintConfig,
}

/// What to do with the comment carried by the input key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentPolicy {
    #[default]
    Preserve,
    Strip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Keep or drop the input comment
    pub comment: CommentPolicy,
    /// Comment to attach when the input has none (PEM keys never do)
    pub default_comment: Option<String>,
    /// Print JSON objects instead of plain key lines
    pub json: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintFormat {
    /// `SHA256:<base64>` as printed by ssh-keygen
    #[default]
    Sha256,
    /// Lowercase hex SHA256
    Hex,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig {
    pub format: FingerprintFormat,
}

impl OutputConfig {
    /// Pick the comment for the output line.
    ///
    /// An explicit override wins, then the input comment (unless the
    /// policy strips it), then `default_comment`.
    pub fn resolve_comment(
        &self,
        input_comment: Option<String>,
        override_comment: Option<String>,
    ) -> Option<String> {
        if override_comment.is_some() {
            return override_comment;
        }
        let kept = match self.comment {
            CommentPolicy::Preserve => input_comment,
            CommentPolicy::Strip => None,
        };
        kept.or_else(|| self.default_comment.clone())
    }
}

impl Config {
    /// Get the XDG config directory for keyline (~/.config/keyline)
    pub fn config_dir() -> PathBuf {
        // Respect XDG_CONFIG_HOME if set, otherwise use ~/.config
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|p| p.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("."))
            })
            .join("keyline")
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load config from XDG config directory
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // No config found, use defaults
            Ok(Self::default())
        }
    }

    /// Load config from a specific path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        Ok(config)
    }

    /// Generate a default config file content
    pub fn default_toml() -> String {
        r#"# keyline configuration
# Location: ~/.config/keyline/config.toml

[output]
# "preserve" keeps the comment from the input key, "strip" drops it
comment = "preserve"
# default_comment = "imported-key"  # Used when the input has no comment
json = false

[fingerprint]
# "sha256" prints SHA256:<base64> like ssh-keygen, "hex" prints lowercase hex
format = "sha256"
"#
        .to_string()
    }

    /// Initialize config directory and create default config if needed
    pub fn init() -> Result<PathBuf> {
        Self::init_at(&Self::config_path())
    }

    /// Write the default config to `config_path` unless it already exists
    pub fn init_at(config_path: &Path) -> Result<PathBuf> {
        if let Some(config_dir) = config_path.parent() {
            std::fs::create_dir_all(config_dir).with_context(|| {
                format!("Failed to create config dir: {}", config_dir.display())
            })?;
        }

        // Write default config if it doesn't exist
        if !config_path.exists() {
            std::fs::write(config_path, Self::default_toml())
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        Ok(config_path.to_path_buf())
    }
}
