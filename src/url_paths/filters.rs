use tracing::trace;

/// Prefixes of references the browser can render as-is.
const REMOTE_PREFIXES: &[&str] = &["http", "blob:", "data:"];

/// Prefix served directly by the backend's static upload handler.
pub const UPLOADS_PREFIX: &str = "/uploads/";

const PUBLIC_PREFIXES: &[&str] = &["public/", "/public/"];

/// Category an image reference falls into before it is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
  /// Missing or empty reference.
  Empty,
  /// Fully qualified URL, blob URL or data URI.
  Remote,
  /// Already rooted under `/uploads/`.
  Upload,
  /// Stored under the legacy `public/` root.
  Public,
  /// Anything else; resolved against the static base.
  Relative,
}

/// Classify a reference. Checks run in a fixed order and the first match wins.
pub fn classify_reference(value: Option<&str>) -> UrlKind {
  let kind = match value {
    None | Some("") => UrlKind::Empty,
    Some(value) if is_remote_reference(value) => UrlKind::Remote,
    Some(value) if value.starts_with(UPLOADS_PREFIX) => UrlKind::Upload,
    Some(value) if PUBLIC_PREFIXES.iter().any(|prefix| value.starts_with(prefix)) => {
      UrlKind::Public
    }
    Some(_) => UrlKind::Relative,
  };
  trace!(?value, ?kind, "classified image reference");
  kind
}

/// Whether the reference can be handed to the renderer without rewriting.
///
/// Matching is case-sensitive and `http` is a bare prefix, so `https://` and anything else
/// starting with those four letters is treated as remote.
pub fn is_remote_reference(value: &str) -> bool {
  REMOTE_PREFIXES
    .iter()
    .any(|prefix| value.starts_with(prefix))
}
