//! Quiz payloads whose image fields are rewritten before rendering.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Quiz as returned by the API, with its image-bearing fields pulled out.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
  /// Stored thumbnail reference.
  #[serde(default)]
  pub thumbnail_url: Option<String>,
  /// Questions in display order.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub questions: Option<Vec<QuestionRecord>>,
  /// Remaining fields, carried through untouched.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Single question belonging to a [`QuizRecord`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
  /// Optional stored image reference.
  #[serde(default)]
  pub image_url: Option<String>,
  /// Remaining fields, carried through untouched.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}
