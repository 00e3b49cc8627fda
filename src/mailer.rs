// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outbound email delivery for accepted submissions.
//!
//! SMTP delivery via lettre. The gateway hands over a fully validated
//! submission; the send is a single bounded remote call with no retry.

use crate::config::EmailConfig;
use crate::validator::ValidatedSubmission;
use async_trait::async_trait;
use lettre::message::{MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Email delivery error types.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("missing email configuration: {0}")]
    MissingConfig(&'static str),

    #[error("invalid email address: {0}")]
    Address(String),

    #[error("failed to build email: {0}")]
    Build(String),

    #[error("SMTP configuration error: {0}")]
    Config(String),

    #[error("SMTP send failed: {0}")]
    Transport(String),
}

/// Delivery seam for accepted contact submissions.
#[async_trait]
pub trait ContactMailer: Send + Sync {
    /// Deliver one submission. Either the message is accepted by the relay
    /// or an error is returned; there is no partial success.
    async fn send(&self, submission: &ValidatedSubmission) -> Result<(), EmailError>;
}

/// SMTP mailer backed by lettre.
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let cfg = &self.config;

        let tls = match cfg.tls_mode.as_str() {
            "tls" => Tls::Wrapper(
                TlsParameters::builder(cfg.smtp_host.clone())
                    .build()
                    .map_err(|e| EmailError::Config(format!("TLS configuration error: {e}")))?,
            ),
            "starttls" => Tls::Opportunistic(
                TlsParameters::builder(cfg.smtp_host.clone())
                    .build()
                    .map_err(|e| EmailError::Config(format!("TLS configuration error: {e}")))?,
            ),
            "none" => Tls::None,
            other => {
                return Err(EmailError::Config(format!(
                    "invalid TLS mode: {other}, must be 'none', 'starttls', or 'tls'"
                )))
            }
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&cfg.smtp_host)
            .port(cfg.smtp_port)
            .timeout(Some(cfg.timeout()))
            .tls(tls);

        if let (Some(user), Some(pass)) = (&cfg.smtp_username, &cfg.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl ContactMailer for SmtpMailer {
    async fn send(&self, submission: &ValidatedSubmission) -> Result<(), EmailError> {
        let sender = self
            .config
            .sender
            .as_deref()
            .ok_or(EmailError::MissingConfig("SENDER_EMAIL"))?;
        let recipient = self
            .config
            .recipient
            .as_deref()
            .ok_or(EmailError::MissingConfig("RECIPIENT_EMAIL"))?;

        let message = Message::builder()
            .from(
                sender
                    .parse()
                    .map_err(|_| EmailError::Address(sender.to_string()))?,
            )
            .reply_to(
                submission
                    .email
                    .parse()
                    .map_err(|_| EmailError::Address(submission.email.clone()))?,
            )
            .to(recipient
                .parse()
                .map_err(|_| EmailError::Address(recipient.to_string()))?)
            .subject(subject_line(submission))
            .multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::plain(text_body(submission)))
                    .singlepart(SinglePart::html(html_body(submission))),
            )
            .map_err(|e| EmailError::Build(e.to_string()))?;

        debug!(to = recipient, "sending contact notification");

        let mailer = self.transport()?;
        match mailer.send(message).await {
            Ok(response) => {
                info!(to = recipient, code = %response.code(), "contact notification sent");
                Ok(())
            }
            Err(e) => {
                warn!(to = recipient, error = %e, "contact notification failed");
                Err(EmailError::Transport(e.to_string()))
            }
        }
    }
}

/// Subject line for the outgoing notification. Falls back to the sender's
/// name when the submission carries no subject.
fn subject_line(submission: &ValidatedSubmission) -> String {
    match submission.subject.as_deref() {
        Some(subject) if !subject.is_empty() => format!("Portfolio contact: {subject}"),
        _ => format!("Portfolio contact: {}", submission.name),
    }
}

fn text_body(submission: &ValidatedSubmission) -> String {
    let mut body = format!("Name: {}\nEmail: {}\n", submission.name, submission.email);
    if let Some(subject) = &submission.subject {
        body.push_str(&format!("Subject: {subject}\n"));
    }
    body.push('\n');
    body.push_str(&submission.message);
    body
}

fn html_body(submission: &ValidatedSubmission) -> String {
    let mut body = String::from(
        "<div style=\"font-family: system-ui, sans-serif; line-height: 1.4;\">\
         <h2>Portfolio contact</h2>",
    );
    body.push_str(&format!(
        "<p><strong>Name:</strong> {}</p>",
        escape_html(&submission.name)
    ));
    body.push_str(&format!(
        "<p><strong>Email:</strong> <a href=\"mailto:{0}\">{0}</a></p>",
        escape_html(&submission.email)
    ));
    if let Some(subject) = &submission.subject {
        body.push_str(&format!(
            "<p><strong>Subject:</strong> {}</p>",
            escape_html(subject)
        ));
    }
    body.push_str("<hr/><div>");
    body.push_str(&escape_html(&submission.message).replace('\n', "<br/>"));
    body.push_str("</div></div>");
    body
}

/// Escape user-supplied text for inclusion in the HTML body.
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
