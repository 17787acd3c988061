use serde_json::Value;

use super::filters::{UPLOADS_PREFIX, UrlKind, classify_reference};
use crate::base_urls::BaseUrls;
use crate::config::ResolverConfig;

/// Rewrites stored image references into URLs the client can render.
///
/// The resolver owns its [`BaseUrls`] and never reads process state, so several resolvers
/// with different bases can coexist in one process.
#[derive(Debug, Clone)]
pub struct ImageUrlResolver {
  bases: BaseUrls,
  guard_static_base: bool,
}

impl ImageUrlResolver {
  /// Build a resolver around the given bases. Relative references always get the static base.
  pub fn new(bases: BaseUrls) -> Self {
    Self {
      bases,
      guard_static_base: false,
    }
  }

  /// Build a resolver from loaded configuration.
  pub fn from_config(config: &ResolverConfig) -> Self {
    Self {
      bases: config.base_urls(),
      guard_static_base: config.guard_static_base,
    }
  }

  /// Leave references that already start with the static base alone instead of prefixing
  /// them again. Off by default.
  pub fn with_static_base_guard(mut self, enabled: bool) -> Self {
    self.guard_static_base = enabled;
    self
  }

  /// Bases this resolver rewrites against.
  pub fn bases(&self) -> &BaseUrls {
    &self.bases
  }

  /// Category the reference falls into.
  pub fn classify(&self, url: Option<&str>) -> UrlKind {
    classify_reference(url)
  }

  /// Resolve a reference. Missing or empty input yields an empty string.
  pub fn resolve(&self, url: Option<&str>) -> String {
    let Some(url) = url else {
      return String::new();
    };

    match classify_reference(Some(url)) {
      UrlKind::Empty => String::new(),
      UrlKind::Remote | UrlKind::Upload => url.to_string(),
      UrlKind::Public => {
        let clean = url.strip_prefix('/').unwrap_or(url);
        let rest = clean.strip_prefix("public/").unwrap_or(clean);
        format!("{UPLOADS_PREFIX}{rest}")
      }
      UrlKind::Relative => self.prefix_static_base(url),
    }
  }

  /// Resolve a dynamically typed value. Anything other than a string yields an empty string.
  pub fn resolve_value(&self, value: &Value) -> String {
    self.resolve(value.as_str())
  }

  fn prefix_static_base(&self, url: &str) -> String {
    let base = self.bases.static_base();
    if self.guard_static_base && is_under_base(base, url) {
      return url.to_string();
    }

    let separator = if url.starts_with('/') { "" } else { "/" };
    format!("{base}{separator}{url}")
  }
}

impl Default for ImageUrlResolver {
  fn default() -> Self {
    Self::new(BaseUrls::default())
  }
}

fn is_under_base(base: &str, url: &str) -> bool {
  if base.is_empty() {
    return false;
  }

  url
    .strip_prefix(base)
    .is_some_and(|suffix| suffix.is_empty() || suffix.starts_with('/'))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  const STATIC_BASE: &str = "https://quiz.example.com";

  fn resolver() -> ImageUrlResolver {
    ImageUrlResolver::new(BaseUrls::from_api_base(format!("{STATIC_BASE}/api")))
  }

  #[test]
  fn empty_and_missing_inputs_resolve_to_empty_string() {
    let resolver = resolver();
    assert_eq!(resolver.resolve(None), "");
    assert_eq!(resolver.resolve(Some("")), "");
  }

  #[test]
  fn non_string_values_resolve_to_empty_string() {
    let resolver = resolver();
    for value in [
      json!(null),
      json!(42),
      json!(true),
      json!(["a.png"]),
      json!({"url": "a.png"}),
      json!(""),
    ] {
      assert_eq!(resolver.resolve_value(&value), "", "value: {value}");
    }
  }

  #[test]
  fn remote_references_are_unchanged() {
    let resolver = resolver();
    for url in [
      "http://cdn.example.com/a.png",
      "https://cdn.example.com/a.png",
      "httpish/a.png",
      "blob:https://quiz.example.com/5f2c",
      "data:image/png;base64,iVBORw0KGgo=",
    ] {
      assert_eq!(resolver.resolve(Some(url)), url);
    }
  }

  #[test]
  fn upload_paths_are_unchanged() {
    let resolver = resolver();
    assert_eq!(
      resolver.resolve(Some("/uploads/questions/1.png")),
      "/uploads/questions/1.png"
    );
  }

  #[test]
  fn public_paths_are_rooted_under_uploads() {
    let resolver = resolver();
    assert_eq!(resolver.resolve(Some("public/a/b.png")), "/uploads/a/b.png");
    assert_eq!(resolver.resolve(Some("/public/a/b.png")), "/uploads/a/b.png");
  }

  #[test]
  fn relative_paths_get_static_base() {
    let resolver = resolver();
    assert_eq!(
      resolver.resolve(Some("foo/bar.png")),
      format!("{STATIC_BASE}/foo/bar.png")
    );
    assert_eq!(
      resolver.resolve(Some("/foo/bar.png")),
      format!("{STATIC_BASE}/foo/bar.png")
    );
  }

  #[test]
  fn string_values_resolve_like_plain_strings() {
    let resolver = resolver();
    assert_eq!(resolver.resolve_value(&json!("public/t.png")), "/uploads/t.png");
  }

  #[test]
  fn relative_static_base_is_always_prefixed_by_default() {
    let resolver = ImageUrlResolver::new(BaseUrls::from_api_base("/foo/api"));
    assert_eq!(resolver.bases().static_base(), "/foo");
    assert_eq!(resolver.resolve(Some("/foo/bar.png")), "/foo/foo/bar.png");
    assert_eq!(resolver.resolve(Some("foo/bar.png")), "/foo/foo/bar.png");

    let resolver = ImageUrlResolver::from_config(&ResolverConfig {
      api_base_url: "/foo/api".into(),
      ..ResolverConfig::default()
    });
    assert_eq!(resolver.resolve(Some("/foo/bar.png")), "/foo/foo/bar.png");
  }

  #[test]
  fn guard_prevents_double_prefixing_relative_static_base() {
    let resolver =
      ImageUrlResolver::new(BaseUrls::from_api_base("/static/api")).with_static_base_guard(true);
    let once = resolver.resolve(Some("images/a.png"));
    assert_eq!(once, "/static/images/a.png");
    assert_eq!(resolver.resolve(Some(&once)), once);
    assert_eq!(resolver.resolve(Some("/staticky/a.png")), "/static/staticky/a.png");
  }

  #[test]
  fn guard_can_be_enabled_from_config() {
    let resolver = ImageUrlResolver::from_config(&ResolverConfig {
      api_base_url: "/static/api".into(),
      guard_static_base: true,
      ..ResolverConfig::default()
    });
    assert_eq!(resolver.resolve(Some("/static/images/a.png")), "/static/images/a.png");
  }

  #[test]
  fn empty_static_base_still_prefixes_separator() {
    let resolver = ImageUrlResolver::new(BaseUrls::from_api_base("/api"));
    assert_eq!(resolver.bases().static_base(), "");
    assert_eq!(resolver.resolve(Some("foo.png")), "/foo.png");
    assert_eq!(resolver.resolve(Some("/foo.png")), "/foo.png");
  }

  #[test]
  fn classify_delegates_to_reference_filters() {
    let resolver = resolver();
    assert_eq!(resolver.classify(Some("public/x.png")), UrlKind::Public);
    assert_eq!(resolver.classify(None), UrlKind::Empty);
  }
}
