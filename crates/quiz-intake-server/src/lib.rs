//! HTTP surface for the quiz-intake service
//!
//! Two public endpoints compose the storage layer:
//!
//! - `POST /api/answers` - validate a quiz submission and persist it
//! - `GET /api/answers` - authorized, bounded, newest-first readback for
//!   the admin dashboard
//!
//! plus `GET /healthz` for liveness probes. See [`routes::router`] for the
//! wiring and [`auth`] for the two-tier trust model on the read path.

pub mod auth;
pub mod config;
pub mod routes;
pub mod validate;
