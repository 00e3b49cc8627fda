// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for submission outcomes.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Terminal outcome of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    RateLimited,
    InvalidJson,
    ValidationFailed,
    Honeypot,
    EmailError,
}

impl SubmissionOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::RateLimited => "rate_limited",
            Self::InvalidJson => "invalid_json",
            Self::ValidationFailed => "validation_failed",
            Self::Honeypot => "honeypot",
            Self::EmailError => "email_error",
        }
    }
}

/// Metrics registry for the gateway.
pub struct Metrics {
    registry: Registry,
    submissions: IntCounterVec,
}

impl Metrics {
    /// Create and register the gateway counters.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let submissions = IntCounterVec::new(
            Opts::new(
                "contact_submissions_total",
                "Contact submission attempts by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(submissions.clone()))?;
        Ok(Self {
            registry,
            submissions,
        })
    }

    /// Count one submission outcome.
    pub fn record(&self, outcome: SubmissionOutcome) {
        self.submissions
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if encoder.encode(&self.registry.gather(), &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes_are_counted() {
        let metrics = Metrics::new().unwrap();
        metrics.record(SubmissionOutcome::Accepted);
        metrics.record(SubmissionOutcome::Accepted);
        metrics.record(SubmissionOutcome::Honeypot);

        let rendered = metrics.render();
        assert!(rendered.contains("contact_submissions_total{outcome=\"accepted\"} 2"));
        assert!(rendered.contains("contact_submissions_total{outcome=\"honeypot\"} 1"));
    }
}
