//! Domain types for the submission store

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Question key → free-text answer, validated to string-to-string at the
/// ingestion boundary and stored as JSONB.
pub type AnswerMap = BTreeMap<String, String>;

/// Open, uninterpreted metadata attached to a submission. Opaque to the
/// store; bounded in size at the validation boundary.
pub type MetaMap = Map<String, Value>;

/// A submission as accepted for insert. The id is generated server-side at
/// write time; the creation timestamp is assigned by the store itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub id: Uuid,
    pub answers: AnswerMap,
    pub persona: String,
    pub meta: MetaMap,
}

/// A persisted submission as read back. Ids are surfaced as the opaque
/// strings the table holds; `created_at` is nullable because rows predating
/// the column default carry no timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub answers: AnswerMap,
    pub persona: String,
    pub meta: MetaMap,
    pub created_at: Option<DateTime<Utc>>,
}
