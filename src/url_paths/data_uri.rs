use base64::{Engine as _, engine::general_purpose};

/// Encode image bytes as an inline `data:` URI for previews that have not been uploaded yet.
///
/// The result is already renderable, so the resolver passes it through untouched.
pub fn preview_data_url(bytes: &[u8], content_type: &str) -> String {
  let encoded = general_purpose::STANDARD.encode(bytes);
  format!("data:{content_type};base64,{encoded}")
}
