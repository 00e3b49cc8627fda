// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Gateway
//!
//! Abuse-resistant submission pipeline for the portfolio contact form:
//!
//! - Client identity extraction from proxy headers
//! - Per-client sliding-window rate limiting (6 per hour default)
//! - Payload schema validation with per-field error reporting
//! - Honeypot bot filtering (silent success, no delivery)
//! - SMTP dispatch of accepted submissions

pub mod client_ip;
pub mod config;
pub mod handlers;
pub mod limiter;
pub mod mailer;
pub mod metrics;
pub mod validator;

pub use config::Config;
pub use limiter::{RateLimitDecision, SlidingWindowLimiter};
pub use validator::{SubmissionValidator, ValidatedSubmission};
