//! Resolver configuration loaded from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::base_urls::{BaseUrls, DEFAULT_API_BASE_URL};
use crate::url_paths::StoredKeySerializer;

/// File names probed by [`ResolverConfig::discover`], in order.
pub const CONFIG_FILE_CANDIDATES: &[&str] = &[
  "image_urls.config.json",
  "image_urls.config.yaml",
  "image_urls.config.yml",
];

/// Environment variable overriding the configured API base.
pub const API_BASE_ENV: &str = "API_BASE_URL";

/// Settings that shape how image references are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
  /// API base URL; the static base is derived by removing a trailing `/api`.
  pub api_base_url: String,
  /// Leave references that already start with the static base untouched. Off by default.
  pub guard_static_base: bool,
  /// Prefix applied to storage keys when serializing them for clients.
  pub upload_base_url: Option<String>,
}

impl Default for ResolverConfig {
  fn default() -> Self {
    Self {
      api_base_url: DEFAULT_API_BASE_URL.into(),
      guard_static_base: false,
      upload_base_url: None,
    }
  }
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
  /// Failed to read the configuration file.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse a JSON configuration file.
  Json {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// Failed to parse a YAML configuration file.
  Yaml {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_yaml::Error,
  },
  /// The file extension is neither JSON nor YAML.
  UnsupportedFormat {
    /// Path that caused the error.
    path: PathBuf,
  },
}

impl ResolverConfig {
  /// Look for a configuration file in `dir`, falling back to defaults.
  ///
  /// A missing or unreadable file is not fatal: callers get defaults and the reason is
  /// logged at debug level.
  pub fn discover(dir: &Path) -> Self {
    for name in CONFIG_FILE_CANDIDATES {
      let candidate = dir.join(name);
      if !candidate.is_file() {
        continue;
      }

      match Self::from_path(&candidate) {
        Ok(config) => return config,
        Err(err) => {
          debug!(error = %err, "ignoring unusable resolver config");
          return Self::default();
        }
      }
    }

    debug!(dir = %dir.display(), "no resolver config found, using defaults");
    Self::default()
  }

  /// Read configuration from a JSON or YAML file, chosen by extension.
  pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    let extension = path
      .extension()
      .and_then(|value| value.to_str())
      .map(str::to_ascii_lowercase);

    match extension.as_deref() {
      Some("json") => serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
      }),
      Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
      }),
      _ => Err(ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
      }),
    }
  }

  /// Apply overrides from the process environment.
  pub fn with_env_overrides(self) -> Self {
    self.with_overrides_from(|key| std::env::var(key).ok())
  }

  /// Apply overrides using an arbitrary variable lookup.
  pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(value) = lookup(API_BASE_ENV).filter(|value| !value.trim().is_empty()) {
      debug!(api_base = %value, "api base overridden from environment");
      self.api_base_url = value;
    }
    self
  }

  /// Base URL pair derived from the configured API base.
  pub fn base_urls(&self) -> BaseUrls {
    BaseUrls::from_api_base(self.api_base_url.clone())
  }

  /// Serializer for storage keys using the configured upload base.
  pub fn stored_key_serializer(&self) -> StoredKeySerializer {
    StoredKeySerializer::new(self.upload_base_url.as_deref())
  }
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Json { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::Yaml { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::UnsupportedFormat { path } => {
        write!(f, "unsupported config format: {}", path.display())
      }
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Json { source, .. } => Some(source),
      Self::Yaml { source, .. } => Some(source),
      Self::UnsupportedFormat { .. } => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn defaults_target_local_backend() {
    let config = ResolverConfig::default();
    assert_eq!(config.api_base_url, "http://localhost:8080/api");
    assert!(!config.guard_static_base);
    assert_eq!(config.base_urls().static_base(), "http://localhost:8080");
    assert_eq!(config.stored_key_serializer().base_url(), "/uploads/");
  }

  #[test]
  fn discover_returns_defaults_when_missing() {
    let temp = tempdir().expect("failed to create temp dir");
    assert_eq!(ResolverConfig::discover(temp.path()), ResolverConfig::default());
  }

  #[test]
  fn discover_reads_json_config() {
    let temp = tempdir().expect("failed to create temp dir");
    std::fs::write(
      temp.path().join("image_urls.config.json"),
      r#"{"apiBaseUrl": "https://quiz.example.com/api", "guardStaticBase": true}"#,
    )
    .expect("failed to write config");

    let config = ResolverConfig::discover(temp.path());
    assert_eq!(config.api_base_url, "https://quiz.example.com/api");
    assert!(config.guard_static_base);
    assert_eq!(config.upload_base_url, None);
  }

  #[test]
  fn discover_reads_yaml_config() {
    let temp = tempdir().expect("failed to create temp dir");
    std::fs::write(
      temp.path().join("image_urls.config.yml"),
      "apiBaseUrl: https://quiz.example.com/api\nuploadBaseUrl: /files\n",
    )
    .expect("failed to write config");

    let config = ResolverConfig::discover(temp.path());
    assert_eq!(config.api_base_url, "https://quiz.example.com/api");
    assert!(!config.guard_static_base);
    assert_eq!(config.stored_key_serializer().base_url(), "/files/");
  }

  #[test]
  fn discover_falls_back_on_invalid_file() {
    let temp = tempdir().expect("failed to create temp dir");
    std::fs::write(temp.path().join("image_urls.config.json"), "{not json")
      .expect("failed to write config");

    assert_eq!(ResolverConfig::discover(temp.path()), ResolverConfig::default());
  }

  #[test]
  fn from_path_reports_errors() {
    let temp = tempdir().expect("failed to create temp dir");

    let missing = temp.path().join("absent.json");
    let err = ResolverConfig::from_path(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("failed to read"));

    let toml = temp.path().join("config.toml");
    std::fs::write(&toml, "api = 1").expect("failed to write config");
    let err = ResolverConfig::from_path(&toml).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));

    let broken = temp.path().join("broken.yaml");
    std::fs::write(&broken, "apiBaseUrl: [unclosed").expect("failed to write config");
    let err = ResolverConfig::from_path(&broken).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml { .. }));
    assert!(std::error::Error::source(&err).is_some());
  }

  #[test]
  fn environment_overrides_api_base() {
    let config = ResolverConfig::default().with_overrides_from(|key| {
      (key == API_BASE_ENV).then(|| "https://staging.example.com/api".to_string())
    });
    assert_eq!(config.base_urls().static_base(), "https://staging.example.com");
  }

  #[test]
  fn blank_environment_value_is_ignored() {
    let config = ResolverConfig::default().with_overrides_from(|_| Some("  ".to_string()));
    assert_eq!(config, ResolverConfig::default());
  }
}
