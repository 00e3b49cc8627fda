// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact gateway.
//!
//! Orchestrates one submission: identity extraction, rate-limit gate, body
//! parse, honeypot filter, validation, and dispatch to the mailer. Every
//! code path maps to one of the enumerated response shapes; nothing escapes
//! as an unhandled fault.

use crate::client_ip::client_identifier;
use crate::config::Config;
use crate::limiter::{RateLimitDecision, SlidingWindowLimiter};
use crate::mailer::ContactMailer;
use crate::metrics::{Metrics, SubmissionOutcome};
use crate::validator::{SubmissionRequest, SubmissionValidator};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Shared application state.
pub struct AppState {
    pub limiter: SlidingWindowLimiter,
    pub validator: SubmissionValidator,
    pub mailer: Arc<dyn ContactMailer>,
    pub metrics: Metrics,
    pub config: Config,
}

/// Success response body.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

fn accepted() -> (StatusCode, Json<OkResponse>) {
    (StatusCode::OK, Json(OkResponse { ok: true }))
}

fn rejected(
    status: StatusCode,
    error: &'static str,
    details: Option<serde_json::Value>,
) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error, details }))
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-gateway",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    state.metrics.render()
}

/// Handle one contact form submission.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let client = client_identifier(&headers);

    // Rate-limit before parsing: shed abusive volume before paying for
    // structured checks. Rejected attempts still count toward the window.
    if let RateLimitDecision::Limited { retry_after } =
        state.limiter.check_and_record(&client).await
    {
        info!(
            client = %client,
            retry_after_secs = retry_after.as_secs(),
            "submission rate limited"
        );
        state.metrics.record(SubmissionOutcome::RateLimited);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [("Retry-After", retry_after.as_secs().to_string())],
            Json(ErrorResponse {
                error: "rate_limited",
                details: None,
            }),
        )
            .into_response();
    }

    let request: SubmissionRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!(client = %client, error = %e, "malformed submission body");
            state.metrics.record(SubmissionOutcome::InvalidJson);
            return rejected(StatusCode::BAD_REQUEST, "invalid_json", None).into_response();
        }
    };

    // A filled honeypot field marks the submission as automated. Respond
    // success-shaped and deliver nothing: bots must not learn they were
    // caught.
    if request.honeypot_triggered() {
        info!(client = %client, "honeypot triggered, dropping submission");
        state.metrics.record(SubmissionOutcome::Honeypot);
        return accepted().into_response();
    }

    let submission = match state.validator.validate(&request) {
        Ok(submission) => submission,
        Err(failure) => {
            debug!(
                client = %client,
                fields = failure.errors.len(),
                "submission validation failed"
            );
            state.metrics.record(SubmissionOutcome::ValidationFailed);
            let details = serde_json::to_value(&failure.errors).ok();
            return rejected(StatusCode::BAD_REQUEST, "validation_failed", details)
                .into_response();
        }
    };

    match state.mailer.send(&submission).await {
        Ok(()) => {
            info!(client = %client, "contact submission accepted");
            state.metrics.record(SubmissionOutcome::Accepted);
            accepted().into_response()
        }
        Err(e) => {
            // Logged internally, never echoed to the caller.
            error!(client = %client, error = %e, "contact dispatch failed");
            state.metrics.record(SubmissionOutcome::EmailError);
            rejected(StatusCode::INTERNAL_SERVER_ERROR, "server_error", None).into_response()
        }
    }
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/api/contact", post(submit));

    if state.config.metrics.enabled {
        router = router.route(state.config.metrics.path.as_str(), get(metrics));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
