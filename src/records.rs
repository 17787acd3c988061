//! Resolution of image fields inside quiz payloads.

use serde_json::{Map, Value};

use crate::models::{QuestionRecord, QuizRecord};
use crate::url_paths::ImageUrlResolver;

const THUMBNAIL_FIELD: &str = "thumbnailUrl";
const QUESTIONS_FIELD: &str = "questions";
const IMAGE_FIELD: &str = "imageUrl";

impl ImageUrlResolver {
  /// Produce a copy of `quiz` with its thumbnail and question images resolved.
  ///
  /// The thumbnail is always present in the output, empty when the source had none.
  /// Questions keep their order and count; a quiz without questions stays without them.
  pub fn resolve_quiz_images(&self, quiz: Option<&QuizRecord>) -> Option<QuizRecord> {
    let quiz = quiz?;

    Some(QuizRecord {
      thumbnail_url: Some(self.resolve(quiz.thumbnail_url.as_deref())),
      questions: quiz.questions.as_ref().map(|questions| {
        questions
          .iter()
          .map(|question| QuestionRecord {
            image_url: Some(self.resolve(question.image_url.as_deref())),
            extra: question.extra.clone(),
          })
          .collect()
      }),
      extra: quiz.extra.clone(),
    })
  }

  /// Untyped variant of [`Self::resolve_quiz_images`] for payloads that skip deserialization.
  ///
  /// Falsy values and non-objects are returned as they are. A `questions` value that is
  /// not an array is copied without changes.
  pub fn resolve_quiz_value(&self, quiz: &Value) -> Value {
    let Value::Object(fields) = quiz else {
      return quiz.clone();
    };

    let mut resolved = fields.clone();
    let thumbnail = self.resolve_value(fields.get(THUMBNAIL_FIELD).unwrap_or(&Value::Null));
    resolved.insert(THUMBNAIL_FIELD.to_string(), Value::String(thumbnail));

    if let Some(Value::Array(questions)) = fields.get(QUESTIONS_FIELD) {
      let questions = questions
        .iter()
        .map(|question| self.resolve_question_value(question))
        .collect();
      resolved.insert(QUESTIONS_FIELD.to_string(), Value::Array(questions));
    }

    Value::Object(resolved)
  }

  fn resolve_question_value(&self, question: &Value) -> Value {
    let mut resolved = match question {
      Value::Object(fields) => fields.clone(),
      _ => Map::new(),
    };
    let image = self.resolve_value(question.get(IMAGE_FIELD).unwrap_or(&Value::Null));
    resolved.insert(IMAGE_FIELD.to_string(), Value::String(image));
    Value::Object(resolved)
  }
}
