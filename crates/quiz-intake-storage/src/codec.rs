//! Parameter codec
//!
//! Converts application-level values into the primitive set the Postgres
//! driver accepts. Timestamps become RFC 3339 strings with millisecond
//! precision, byte sequences become standard base64; scalars pass through.
//! Normalization is pure: no I/O, no failure for any value in the allowed
//! set, and identical input always yields identical output.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

/// Values accepted at query call sites
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Timestamp(DateTime<Utc>),
    Bytes(Vec<u8>),
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

/// Values the driver binds directly
#[derive(Debug, Clone, PartialEq)]
pub enum DriverParam {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Render a timestamp in the single canonical form the store ever writes
/// or surfaces: RFC 3339, millisecond precision, UTC `Z` suffix.
pub fn canonical_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalize an ordered value sequence into driver primitives.
pub fn normalize(values: &[SqlValue]) -> Vec<DriverParam> {
    values
        .iter()
        .map(|v| match v {
            SqlValue::Text(s) => DriverParam::Text(s.clone()),
            SqlValue::Int(n) => DriverParam::Int(*n),
            SqlValue::Float(f) => DriverParam::Float(*f),
            SqlValue::Bool(b) => DriverParam::Bool(*b),
            SqlValue::Null => DriverParam::Null,
            SqlValue::Timestamp(ts) => DriverParam::Text(canonical_timestamp(*ts)),
            SqlValue::Bytes(b) => DriverParam::Text(BASE64.encode(b)),
        })
        .collect()
}

/// Bind normalized params onto a query in order.
pub fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[DriverParam],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            DriverParam::Text(s) => query.bind(s.clone()),
            DriverParam::Int(n) => query.bind(*n),
            DriverParam::Float(f) => query.bind(*f),
            DriverParam::Bool(b) => query.bind(*b),
            DriverParam::Null => query.bind(Option::<String>::None),
        };
    }
    query
}
