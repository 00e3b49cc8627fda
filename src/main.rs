// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Gateway Service
//!
//! An abuse-resistant ingress for the portfolio contact form:
//!
//! - Per-client sliding-window rate limiting (6 per hour default)
//! - Payload validation and normalization
//! - Honeypot bot filtering with silent success
//! - SMTP dispatch of accepted submissions
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `RATE_LIMIT_MAX`: Max submissions per window per client (default: 6)
//! - `RATE_LIMIT_WINDOW_SECS`: Window length in seconds (default: 3600)
//! - `IDLE_EXPIRY_SECS`: Idle client eviction threshold (default: 7200)
//! - `SENDER_EMAIL` / `RECIPIENT_EMAIL`: Delivery addresses; dispatch fails
//!   when either is unset
//! - `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`,
//!   `SMTP_TLS_MODE`, `SMTP_TIMEOUT_SECS`: SMTP relay settings

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_gateway::{
    config::{Config, EmailConfig, RateLimitConfig},
    handlers::{router, AppState},
    limiter::SlidingWindowLimiter,
    mailer::SmtpMailer,
    metrics::Metrics,
    validator::SubmissionValidator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        "Starting contact gateway"
    );

    // Create application state
    let limiter = SlidingWindowLimiter::new(config.rate_limit.clone());
    let validator = SubmissionValidator::new(config.validation.clone());
    let mailer = Arc::new(SmtpMailer::new(config.email.clone()));
    let metrics = Metrics::new()?;

    let state = Arc::new(AppState {
        limiter,
        validator,
        mailer,
        metrics,
        config: config.clone(),
    });

    // Spawn idle-client eviction task
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            cleanup_state.limiter.cleanup().await;
        }
    });

    // Build router
    let app = router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        rate_limit: RateLimitConfig {
            max_requests: std::env::var("RATE_LIMIT_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6),
            window_secs: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            idle_expiry_secs: std::env::var("IDLE_EXPIRY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7200),
        },
        email: EmailConfig {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            smtp_username: std::env::var("SMTP_USERNAME").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            tls_mode: std::env::var("SMTP_TLS_MODE").unwrap_or_else(|_| "starttls".to_string()),
            timeout_secs: std::env::var("SMTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            sender: std::env::var("SENDER_EMAIL").ok(),
            recipient: std::env::var("RECIPIENT_EMAIL").ok(),
        },
        ..Default::default()
    }
}
