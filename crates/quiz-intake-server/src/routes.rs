//! HTTP surface: ingestion, query, and health endpoints
//!
//! Requests are handled independently and concurrently; the shared state is
//! the store handle (whose pool does its own connection accounting) plus
//! two immutable config values. Diagnostic detail goes to logs only; no
//! response body carries internal error text.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, warn};
use uuid::Uuid;

use quiz_intake_storage::codec::canonical_timestamp;
use quiz_intake_storage::{AnswerMap, MetaMap, NewSubmission, Submission, SubmissionStore};

use crate::auth::{self, AuthDecision};
use crate::validate;

/// Default result size when `limit` is absent or non-numeric
const DEFAULT_LIMIT: i64 = 100;
/// Hard cap on the result size
const MAX_LIMIT: i64 = 1000;

/// Shared state for the request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
    pub public_host: String,
    pub api_key: Option<String>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/answers", post(ingest).get(list_submissions))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// External shape of a persisted submission
#[derive(Debug, Serialize)]
struct SubmissionRecord {
    id: String,
    answers: AnswerMap,
    persona: String,
    meta: MetaMap,
    #[serde(rename = "createdAt")]
    created_at: Option<String>,
}

impl From<Submission> for SubmissionRecord {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            answers: submission.answers,
            persona: submission.persona,
            meta: submission.meta,
            created_at: submission.created_at.map(canonical_timestamp),
        }
    }
}

/// POST /api/answers - validate and persist one submission.
///
/// Success acknowledges with the server-generated id. Every failure,
/// validation or store, answers `400 {"ok":false}` with the distinction
/// kept in logs; no partial write is possible (single statement).
async fn ingest(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Ok(Json(payload)) = payload else {
        warn!("rejected submission: body is not JSON");
        return (StatusCode::BAD_REQUEST, Json(json!({ "ok": false })));
    };

    let valid = match validate::validate(payload) {
        Ok(valid) => valid,
        Err(err) => {
            warn!(error = %err, "rejected submission");
            return (StatusCode::BAD_REQUEST, Json(json!({ "ok": false })));
        }
    };

    let id = Uuid::new_v4();
    let submission = NewSubmission {
        id,
        answers: valid.answers,
        persona: valid.persona,
        meta: valid.meta,
    };

    match state.store.insert_submission(submission).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "ok": true, "id": id.to_string() })),
        ),
        Err(err) => {
            error!(error = %err, "submission insert failed");
            (StatusCode::BAD_REQUEST, Json(json!({ "ok": false })))
        }
    }
}

/// GET /api/answers - authorized, bounded, newest-first read.
///
/// Store failures answer `500 {"items":[]}`: the consuming dashboard keeps
/// rendering on an empty list while the store is briefly unavailable.
async fn list_submissions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let decision = auth::authorize(
        &state.public_host,
        header_str(&headers, header::HOST.as_str()),
        header_str(&headers, "x-forwarded-host"),
        header_str(&headers, header::AUTHORIZATION.as_str()),
        state.api_key.as_deref(),
    );
    if decision == AuthDecision::Denied {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        );
    }

    let limit = clamp_limit(params.get("limit").map(String::as_str));

    match state.store.list_recent(limit).await {
        Ok(submissions) => {
            debug!(count = submissions.len(), limit, "listed submissions");
            let items: Vec<SubmissionRecord> =
                submissions.into_iter().map(SubmissionRecord::from).collect();
            (StatusCode::OK, Json(json!({ "items": items })))
        }
        Err(err) => {
            error!(error = %err, "submission query failed, failing open");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "items": [] })),
            )
        }
    }
}

/// GET /healthz - store reachability probe.
async fn healthz(State(state): State<AppState>) -> StatusCode {
    match state.store.health_check().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            warn!(error = %err, "health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Clamp the requested result size into `[1, MAX_LIMIT]`, defaulting when
/// the parameter is absent or not a finite number.
fn clamp_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(|n| (n as i64).clamp(1, MAX_LIMIT))
        .unwrap_or(DEFAULT_LIMIT)
}
