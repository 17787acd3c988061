//! Helpers for references written before uploads were served from the canonical root.
//!
//! Older records hold either host-qualified URLs pointing at the development backend
//! (`http://localhost:8080/uploads/...`) or bare `/uploads/...` paths. The backend stores
//! plain storage keys today; these helpers translate between the two worlds.

use std::sync::OnceLock;

use regex::Regex;

use super::filters::UPLOADS_PREFIX;

/// Root the backend's static handler maps legacy storage keys under.
pub const LEGACY_UPLOAD_ROOT: &str = "/uploads/public/upload/";

fn legacy_upload_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"(?i)^(?:https?://localhost:8080)?/uploads/").expect("invalid legacy upload regex")
  })
}

/// Strip a legacy upload prefix, returning the remaining path when one was present.
///
/// The prefix is matched case-insensitively and the returned slice is taken from the
/// original string at the match boundary, so casing differences never shift the split.
fn strip_legacy_prefix(url: &str) -> Option<&str> {
  legacy_upload_pattern()
    .find(url)
    .map(|found| &url[found.end()..])
}

/// Remap a legacy upload reference onto [`LEGACY_UPLOAD_ROOT`].
///
/// Returns `None` when the reference is neither a host-qualified legacy URL nor a bare
/// `/uploads/` path. This is not part of [`super::ImageUrlResolver::resolve`].
pub fn remap_legacy_upload_url(url: &str) -> Option<String> {
  let path = strip_legacy_prefix(url)?;
  let clean = path.strip_prefix('/').unwrap_or(path);
  Some(format!("{LEGACY_UPLOAD_ROOT}{clean}"))
}

/// Reduce a legacy upload reference to its storage key, leaving anything else untouched.
pub fn normalize_legacy_url(url: &str) -> &str {
  strip_legacy_prefix(url).unwrap_or(url)
}

/// Extract the storage key from a reference that may carry an upload prefix.
///
/// Everything after the first `/uploads/` occurrence is the key; references without one
/// are assumed to be keys already and come back unchanged, blank ones included. Only a
/// missing reference has no key.
pub fn extract_upload_key(url: Option<&str>) -> Option<&str> {
  let url = url?;
  match url.find(UPLOADS_PREFIX) {
    Some(index) => Some(&url[index + UPLOADS_PREFIX.len()..]),
    None => Some(url),
  }
}

/// Serializes stored keys into URLs for API responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredKeySerializer {
  base_url: String,
}

impl StoredKeySerializer {
  /// Use `base_url` as the prefix for storage keys. Blank values keep the `/uploads/` default.
  pub fn new(base_url: Option<&str>) -> Self {
    let base_url = match base_url.map(str::trim) {
      Some(value) if !value.is_empty() => {
        if value.ends_with('/') {
          value.to_string()
        } else {
          format!("{value}/")
        }
      }
      _ => UPLOADS_PREFIX.to_string(),
    };

    Self { base_url }
  }

  /// Prefix applied to storage keys.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Turn a stored value into the URL sent to clients.
  ///
  /// Absolute `http(s)` URLs pass through, legacy upload URLs collapse to their key first,
  /// and keys get the configured base with any leading slash removed.
  pub fn serialize(&self, value: Option<&str>) -> Option<String> {
    let value = value?;
    if is_absolute_http(value) {
      return Some(value.to_string());
    }

    let normalized = normalize_legacy_url(value);
    if is_absolute_http(normalized) {
      return Some(normalized.to_string());
    }

    let key = normalized.strip_prefix('/').unwrap_or(normalized);
    Some(format!("{}{}", self.base_url, key))
  }
}

impl Default for StoredKeySerializer {
  fn default() -> Self {
    Self::new(None)
  }
}

fn is_absolute_http(value: &str) -> bool {
  ["http://", "https://"].iter().any(|scheme| {
    value
      .get(..scheme.len())
      .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
  })
}
