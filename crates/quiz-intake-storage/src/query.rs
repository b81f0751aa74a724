//! Parameterized query construction
//!
//! Turns literal SQL fragments interleaved with values into positional
//! `$1..$N` placeholder text plus an ordered, codec-normalized parameter
//! list. Values are only ever bound as parameters; their content never
//! appears in the SQL text, for any value type.

use crate::codec::{self, DriverParam, SqlValue};
use crate::error::StoreError;

/// A query ready for execution: placeholder text plus ordered params
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub text: String,
    pub params: Vec<DriverParam>,
}

/// Build a parameterized query from literal fragments and values.
///
/// `fragments` must contain exactly one more element than `values`; the
/// i-th value is bound at the seam between fragments i and i+1. Zero values
/// with a single fragment is legal and yields an empty parameter list.
///
/// # Errors
///
/// Returns `StoreError::InvalidQueryShape` on arity mismatch.
pub fn build(fragments: &[&str], values: &[SqlValue]) -> Result<BuiltQuery, StoreError> {
    if fragments.len() != values.len() + 1 {
        return Err(StoreError::InvalidQueryShape(fragments.len(), values.len()));
    }

    let mut text = String::with_capacity(fragments.iter().map(|f| f.len()).sum::<usize>() + 4 * values.len());
    text.push_str(fragments[0]);
    for (i, fragment) in fragments[1..].iter().enumerate() {
        text.push('$');
        text.push_str(&(i + 1).to_string());
        text.push_str(fragment);
    }

    Ok(BuiltQuery {
        text,
        params: codec::normalize(values),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn placeholder_count(text: &str) -> usize {
        (1..)
            .take_while(|n| text.contains(&format!("${}", n)))
            .count()
    }

    #[test]
    fn test_placeholders_match_value_count() {
        let built = build(
            &["SELECT * FROM t WHERE a = ", " AND b = ", " AND c = ", ""],
            &[
                SqlValue::Text("x".into()),
                SqlValue::Int(7),
                SqlValue::Bool(false),
            ],
        )
        .unwrap();

        assert_eq!(
            built.text,
            "SELECT * FROM t WHERE a = $1 AND b = $2 AND c = $3"
        );
        assert_eq!(placeholder_count(&built.text), 3);
        assert_eq!(built.params.len(), 3);
    }

    #[test]
    fn test_zero_values() {
        let built = build(&["SELECT 1"], &[]).unwrap();
        assert_eq!(built.text, "SELECT 1");
        assert!(built.params.is_empty());
    }

    #[test]
    fn test_arity_mismatch() {
        let err = build(&["a", "b"], &[]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidQueryShape(2, 0)));
    }

    #[test]
    fn test_value_content_never_in_text() {
        let hostile = "' OR 1=1; --";
        let built = build(
            &["SELECT * FROM t WHERE name = ", ""],
            &[SqlValue::Text(hostile.into())],
        )
        .unwrap();

        assert!(!built.text.contains(hostile));
        assert!(!built.text.contains("OR 1=1"));
        assert_eq!(built.text, "SELECT * FROM t WHERE name = $1");
        assert_eq!(built.params, vec![crate::codec::DriverParam::Text(hostile.into())]);
    }

    #[test]
    fn test_mixed_value_types_all_bound() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let built = build(
            &["INSERT INTO t VALUES (", ", ", ", ", ", ", ", ", ")"],
            &[
                SqlValue::Text("it's a string".into()),
                SqlValue::Int(-3),
                SqlValue::Null,
                SqlValue::Timestamp(ts),
                SqlValue::Bytes(vec![b'\'', b';']),
            ],
        )
        .unwrap();

        assert_eq!(built.text, "INSERT INTO t VALUES ($1, $2, $3, $4, $5)");
        assert_eq!(built.params.len(), 5);
        // Raw string content must not leak into the text
        assert!(!built.text.contains("it's"));
    }
}
