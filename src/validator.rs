// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact submission validation and normalization.
//!
//! Schema-checks the raw wire payload and either yields an immutable,
//! trimmed [`ValidatedSubmission`] or the complete list of violated field
//! constraints, never a partially-normalized record.

use crate::config::ValidationConfig;
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw wire payload for a contact submission.
///
/// Every field is optional at the parse layer so that a missing field
/// surfaces as a per-field validation error rather than a body decode
/// failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    /// Honeypot field; legitimate clients leave it empty or absent
    pub hp: Option<String>,
}

impl SubmissionRequest {
    /// True when the hidden honeypot field was filled in.
    pub fn honeypot_triggered(&self) -> bool {
        self.hp.as_deref().is_some_and(|hp| !hp.is_empty())
    }
}

/// Fully validated, trimmed contact submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedSubmission {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Complete list of violated constraints for one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("submission validation failed on {} field(s)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

/// Schema validator for contact submissions.
pub struct SubmissionValidator {
    config: ValidationConfig,
}

impl SubmissionValidator {
    /// Create a new validator with the given field bounds.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a raw payload.
    ///
    /// Total and side-effect-free: collects every violated constraint
    /// instead of stopping at the first. Leading and trailing whitespace is
    /// stripped only after all bounds have been satisfied.
    pub fn validate(&self, req: &SubmissionRequest) -> Result<ValidatedSubmission, ValidationErrors> {
        let cfg = &self.config;
        let mut errors = Vec::new();

        match req.name.as_deref() {
            Some(name) => {
                let len = name.chars().count();
                if len < cfg.name_min_chars || len > cfg.name_max_chars {
                    errors.push(FieldError {
                        field: "name",
                        message: format!(
                            "must be between {} and {} characters",
                            cfg.name_min_chars, cfg.name_max_chars
                        ),
                    });
                }
            }
            None => errors.push(FieldError {
                field: "name",
                message: "is required".to_string(),
            }),
        }

        match req.email.as_deref() {
            Some(email) => {
                if email.chars().count() > cfg.email_max_chars {
                    errors.push(FieldError {
                        field: "email",
                        message: format!("must be at most {} characters", cfg.email_max_chars),
                    });
                } else if !EmailAddress::is_valid(email) {
                    errors.push(FieldError {
                        field: "email",
                        message: "must be a valid email address".to_string(),
                    });
                }
            }
            None => errors.push(FieldError {
                field: "email",
                message: "is required".to_string(),
            }),
        }

        if let Some(subject) = req.subject.as_deref() {
            if subject.chars().count() > cfg.subject_max_chars {
                errors.push(FieldError {
                    field: "subject",
                    message: format!("must be at most {} characters", cfg.subject_max_chars),
                });
            }
        }

        match req.message.as_deref() {
            Some(message) => {
                let len = message.chars().count();
                if len < cfg.message_min_chars || len > cfg.message_max_chars {
                    errors.push(FieldError {
                        field: "message",
                        message: format!(
                            "must be between {} and {} characters",
                            cfg.message_min_chars, cfg.message_max_chars
                        ),
                    });
                }
            }
            None => errors.push(FieldError {
                field: "message",
                message: "is required".to_string(),
            }),
        }

        // Redundant with the orchestrator's honeypot gate, but kept explicit
        // so the validator stands alone.
        if let Some(hp) = req.hp.as_deref() {
            if !hp.is_empty() {
                errors.push(FieldError {
                    field: "hp",
                    message: "must be empty".to_string(),
                });
            }
        }

        match (&req.name, &req.email, &req.message) {
            (Some(name), Some(email), Some(message)) if errors.is_empty() => {
                Ok(ValidatedSubmission {
                    name: name.trim().to_string(),
                    email: email.trim().to_string(),
                    subject: req
                        .subject
                        .as_deref()
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty()),
                    message: message.trim().to_string(),
                })
            }
            _ => Err(ValidationErrors { errors }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_validator() -> SubmissionValidator {
        SubmissionValidator::new(ValidationConfig::default())
    }

    fn valid_request() -> SubmissionRequest {
        SubmissionRequest {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            subject: Some("Collaboration".to_string()),
            message: Some("I would like to talk about a project.".to_string()),
            hp: None,
        }
    }

    fn fields(errors: &ValidationErrors) -> Vec<&'static str> {
        errors.errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_payload_is_trimmed() {
        let validator = default_validator();
        let req = SubmissionRequest {
            name: Some("  Ada Lovelace  ".to_string()),
            email: Some(" ada@example.com ".to_string()),
            subject: Some("  Collaboration ".to_string()),
            message: Some("  Let's build something.  ".to_string()),
            hp: Some(String::new()),
        };

        let submission = validator.validate(&req).unwrap();
        assert_eq!(submission.name, "Ada Lovelace");
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.subject.as_deref(), Some("Collaboration"));
        assert_eq!(submission.message, "Let's build something.");
    }

    #[test]
    fn test_subject_is_optional() {
        let validator = default_validator();
        let req = SubmissionRequest {
            subject: None,
            ..valid_request()
        };
        let submission = validator.validate(&req).unwrap();
        assert_eq!(submission.subject, None);
    }

    #[test]
    fn test_name_too_short() {
        let validator = default_validator();
        let req = SubmissionRequest {
            name: Some("A".to_string()),
            ..valid_request()
        };
        let errors = validator.validate(&req).unwrap_err();
        assert_eq!(fields(&errors), vec!["name"]);
    }

    #[test]
    fn test_name_too_long() {
        let validator = default_validator();
        let req = SubmissionRequest {
            name: Some("x".repeat(101)),
            ..valid_request()
        };
        let errors = validator.validate(&req).unwrap_err();
        assert_eq!(fields(&errors), vec!["name"]);
    }

    #[test]
    fn test_malformed_email() {
        let validator = default_validator();
        let req = SubmissionRequest {
            email: Some("not-an-address".to_string()),
            ..valid_request()
        };
        let errors = validator.validate(&req).unwrap_err();
        assert_eq!(fields(&errors), vec!["email"]);
    }

    #[test]
    fn test_email_too_long() {
        let validator = default_validator();
        let req = SubmissionRequest {
            email: Some(format!("{}@example.com", "x".repeat(250))),
            ..valid_request()
        };
        let errors = validator.validate(&req).unwrap_err();
        assert_eq!(fields(&errors), vec!["email"]);
    }

    #[test]
    fn test_subject_too_long() {
        let validator = default_validator();
        let req = SubmissionRequest {
            subject: Some("x".repeat(201)),
            ..valid_request()
        };
        let errors = validator.validate(&req).unwrap_err();
        assert_eq!(fields(&errors), vec!["subject"]);
    }

    #[test]
    fn test_message_too_long() {
        let validator = default_validator();
        let req = SubmissionRequest {
            message: Some("x".repeat(2001)),
            ..valid_request()
        };
        let errors = validator.validate(&req).unwrap_err();
        assert_eq!(fields(&errors), vec!["message"]);
    }

    #[test]
    fn test_message_too_short() {
        let validator = default_validator();
        let req = SubmissionRequest {
            message: Some("hi".to_string()),
            ..valid_request()
        };
        let errors = validator.validate(&req).unwrap_err();
        assert_eq!(fields(&errors), vec!["message"]);
    }

    #[test]
    fn test_missing_required_fields_all_reported() {
        let validator = default_validator();
        let errors = validator.validate(&SubmissionRequest::default()).unwrap_err();
        assert_eq!(fields(&errors), vec!["name", "email", "message"]);
    }

    #[test]
    fn test_multiple_violations_all_reported() {
        let validator = default_validator();
        let req = SubmissionRequest {
            name: Some("A".to_string()),
            email: Some("bad".to_string()),
            subject: None,
            message: Some("hi".to_string()),
            hp: None,
        };
        let errors = validator.validate(&req).unwrap_err();
        assert_eq!(fields(&errors), vec!["name", "email", "message"]);
    }

    #[test]
    fn test_filled_honeypot_fails_standalone_validation() {
        let validator = default_validator();
        let req = SubmissionRequest {
            hp: Some("http://spam.example".to_string()),
            ..valid_request()
        };
        let errors = validator.validate(&req).unwrap_err();
        assert_eq!(fields(&errors), vec!["hp"]);
    }

    #[test]
    fn test_honeypot_triggered() {
        let filled = SubmissionRequest {
            hp: Some("gotcha".to_string()),
            ..valid_request()
        };
        assert!(filled.honeypot_triggered());

        let empty = SubmissionRequest {
            hp: Some(String::new()),
            ..valid_request()
        };
        assert!(!empty.honeypot_triggered());
        assert!(!valid_request().honeypot_triggered());
    }

    #[test]
    fn test_empty_subject_normalizes_to_none() {
        let validator = default_validator();
        let req = SubmissionRequest {
            subject: Some("   ".to_string()),
            ..valid_request()
        };
        let submission = validator.validate(&req).unwrap();
        assert_eq!(submission.subject, None);
    }
}
