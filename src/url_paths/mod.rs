//! Classification and rewriting of stored image references.
//!
//! Responsibilities are split so each piece can be tested alone: `filters` decides which
//! category a reference belongs to, `resolve` turns it into a renderable URL, `legacy`
//! handles references written by older backends, and `data_uri` builds inline previews.

mod data_uri;
mod filters;
mod legacy;
mod resolve;

pub use data_uri::preview_data_url;
pub use filters::{UPLOADS_PREFIX, UrlKind, classify_reference, is_remote_reference};
pub use legacy::{
  LEGACY_UPLOAD_ROOT, StoredKeySerializer, extract_upload_key, normalize_legacy_url,
  remap_legacy_upload_url,
};
pub use resolve::ImageUrlResolver;
