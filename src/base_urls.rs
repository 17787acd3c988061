//! The API/static base URL pair every resolver is built around.

/// API base used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

const API_SUFFIX: &str = "/api";

/// Immutable pair of base URLs derived from a single configured API base.
///
/// The static base is the API base with one trailing `/api` segment removed. Backend-served
/// assets that are not already rooted under `/uploads/` are resolved against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
  api_base: String,
  static_base: String,
}

impl BaseUrls {
  /// Derive both bases from the configured API base string.
  pub fn from_api_base(api_base: impl Into<String>) -> Self {
    let api_base = api_base.into();
    let static_base = api_base
      .strip_suffix(API_SUFFIX)
      .unwrap_or(&api_base)
      .to_string();

    Self {
      api_base,
      static_base,
    }
  }

  /// The API base exactly as configured.
  pub fn api_base(&self) -> &str {
    &self.api_base
  }

  /// Root against which relative backend paths are resolved.
  pub fn static_base(&self) -> &str {
    &self.static_base
  }
}

impl Default for BaseUrls {
  fn default() -> Self {
    Self::from_api_base(DEFAULT_API_BASE_URL)
  }
}
