//! Liveness and readiness probes.
//!
//! `/healthz` only proves the process answers. `/readyz` is assembled per
//! service from the backing stores it depends on.

use std::collections::BTreeMap;
use std::fmt::Display;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Handler for `GET /healthz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Outcome of a set of dependency checks, rendered as
/// `{"status": "healthy"|"unhealthy", "checks": {"database": "connected", ...}}`.
///
/// Responds 200 when every check passed and 503 otherwise.
#[derive(Debug, Default)]
pub struct Readiness {
    checks: BTreeMap<&'static str, Result<(), String>>,
}

#[derive(Debug, Serialize)]
struct ReadinessBody {
    status: &'static str,
    checks: BTreeMap<&'static str, String>,
}

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of probing `name`.
    pub fn check<E: Display>(mut self, name: &'static str, result: Result<(), E>) -> Self {
        self.checks.insert(name, result.map_err(|e| e.to_string()));
        self
    }

    pub fn is_ready(&self) -> bool {
        self.checks.values().all(Result::is_ok)
    }
}

impl IntoResponse for Readiness {
    fn into_response(self) -> Response {
        let ready = self.is_ready();
        let checks = self
            .checks
            .into_iter()
            .map(|(name, result)| {
                let detail = match result {
                    Ok(()) => "connected".to_owned(),
                    Err(e) => {
                        tracing::warn!(dependency = name, error = %e, "readiness check failed");
                        format!("error: {e}")
                    }
                };
                (name, detail)
            })
            .collect();
        let (status, label) = if ready {
            (StatusCode::OK, "healthy")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        };
        (
            status,
            Json(ReadinessBody {
                status: label,
                checks,
            }),
        )
            .into_response()
    }
}
