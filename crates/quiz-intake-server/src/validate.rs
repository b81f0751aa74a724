//! Inbound submission validation
//!
//! Total and side-effect free: a payload either deserializes into the
//! required shape or is rejected before anything touches the store. The
//! HTTP layer deliberately surfaces no field-level detail; the variants
//! here exist for logs and tests.

use quiz_intake_storage::{AnswerMap, MetaMap};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Upper bound on the serialized size of `meta`. The mapping is stored
/// opaquely, so a size cap is the only structural constraint on it.
pub const MAX_META_BYTES: usize = 16 * 1024;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// Top level is not an object, `answers` is missing or not a
    /// string-to-string map, `persona` is missing or not a string, or
    /// `meta` is present but not an object
    #[error("malformed payload: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("persona must be a non-empty string")]
    EmptyPersona,

    #[error("meta exceeds {MAX_META_BYTES} bytes ({0} serialized)")]
    MetaTooLarge(usize),
}

/// A submission payload that passed validation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidSubmission {
    pub answers: AnswerMap,
    pub persona: String,
    #[serde(default)]
    pub meta: MetaMap,
}

/// Validate an inbound payload against the required submission shape.
pub fn validate(payload: Value) -> Result<ValidSubmission, ValidationError> {
    let submission: ValidSubmission = serde_json::from_value(payload)?;

    if submission.persona.is_empty() {
        return Err(ValidationError::EmptyPersona);
    }

    let meta_size = serde_json::to_vec(&submission.meta)?.len();
    if meta_size > MAX_META_BYTES {
        return Err(ValidationError::MetaTooLarge(meta_size));
    }

    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_payload() {
        let valid = validate(json!({
            "answers": {"q1": "yes", "q2": "blue"},
            "persona": "owl",
            "meta": {"ua": "test", "elapsed_ms": 4200}
        }))
        .unwrap();

        assert_eq!(valid.answers.get("q2").map(String::as_str), Some("blue"));
        assert_eq!(valid.persona, "owl");
        assert_eq!(valid.meta.len(), 2);
    }

    #[test]
    fn test_omitted_meta_defaults_to_empty() {
        let valid = validate(json!({
            "answers": {"q1": "yes"},
            "persona": "fox"
        }))
        .unwrap();
        assert!(valid.meta.is_empty());
    }

    #[test]
    fn test_missing_answers_rejected() {
        let result = validate(json!({"persona": "fox"}));
        assert!(matches!(result, Err(ValidationError::Shape(_))));
    }

    #[test]
    fn test_answers_as_list_rejected() {
        let result = validate(json!({
            "answers": ["yes", "no"],
            "persona": "fox"
        }));
        assert!(matches!(result, Err(ValidationError::Shape(_))));
    }

    #[test]
    fn test_non_string_answer_value_rejected() {
        let result = validate(json!({
            "answers": {"q1": 7},
            "persona": "fox"
        }));
        assert!(matches!(result, Err(ValidationError::Shape(_))));
    }

    #[test]
    fn test_non_object_top_level_rejected() {
        assert!(matches!(
            validate(json!("just a string")),
            Err(ValidationError::Shape(_))
        ));
        assert!(matches!(validate(json!(null)), Err(ValidationError::Shape(_))));
    }

    #[test]
    fn test_empty_persona_rejected() {
        let result = validate(json!({
            "answers": {"q1": "yes"},
            "persona": ""
        }));
        assert!(matches!(result, Err(ValidationError::EmptyPersona)));
    }

    #[test]
    fn test_non_object_meta_rejected() {
        let result = validate(json!({
            "answers": {"q1": "yes"},
            "persona": "fox",
            "meta": [1, 2, 3]
        }));
        assert!(matches!(result, Err(ValidationError::Shape(_))));
    }

    #[test]
    fn test_oversized_meta_rejected() {
        let blob = "x".repeat(MAX_META_BYTES + 1);
        let result = validate(json!({
            "answers": {"q1": "yes"},
            "persona": "fox",
            "meta": {"blob": blob}
        }));
        assert!(matches!(result, Err(ValidationError::MetaTooLarge(_))));
    }

    #[test]
    fn test_unknown_top_level_fields_ignored() {
        // The legacy client sends extra fields; they are stripped, not fatal
        let valid = validate(json!({
            "answers": {"q1": "yes"},
            "persona": "fox",
            "source": "share-link"
        }))
        .unwrap();
        assert_eq!(valid.persona, "fox");
    }
}
