// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact gateway.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the contact gateway service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Submission validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Outbound email configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Rate limiting configuration for the submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum submissions per window per client (default: 6)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Sliding window length in seconds (default: 3600)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Idle time after which a client's entry is evicted, in seconds
    /// (default: 7200)
    #[serde(default = "default_idle_expiry_secs")]
    pub idle_expiry_secs: u64,
}

/// Field bounds for submission validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum name length in characters (default: 2)
    #[serde(default = "default_name_min_chars")]
    pub name_min_chars: usize,

    /// Maximum name length in characters (default: 100)
    #[serde(default = "default_name_max_chars")]
    pub name_max_chars: usize,

    /// Maximum email length in characters (default: 254)
    #[serde(default = "default_email_max_chars")]
    pub email_max_chars: usize,

    /// Maximum subject length in characters (default: 200)
    #[serde(default = "default_subject_max_chars")]
    pub subject_max_chars: usize,

    /// Minimum message length in characters (default: 5)
    #[serde(default = "default_message_min_chars")]
    pub message_min_chars: usize,

    /// Maximum message length in characters (default: 2000)
    #[serde(default = "default_message_max_chars")]
    pub message_max_chars: usize,
}

/// SMTP delivery configuration.
///
/// Sender and recipient are optional at startup; a missing one fails the
/// dispatch call, not the boot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host (default: localhost)
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP relay port (default: 587)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username, credentials skipped when unset
    #[serde(default)]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[serde(default)]
    pub smtp_password: Option<String>,

    /// TLS mode: "none", "starttls" or "tls" (default: starttls)
    #[serde(default = "default_tls_mode")]
    pub tls_mode: String,

    /// SMTP timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// From address for outgoing notifications
    #[serde(default)]
    pub sender: Option<String>,

    /// Destination address for submissions
    #[serde(default)]
    pub recipient: Option<String>,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_requests() -> u32 {
    6
}

fn default_window_secs() -> u64 {
    3600 // 1 hour
}

fn default_idle_expiry_secs() -> u64 {
    7200
}

fn default_name_min_chars() -> usize {
    2
}

fn default_name_max_chars() -> usize {
    100
}

fn default_email_max_chars() -> usize {
    254
}

fn default_subject_max_chars() -> usize {
    200
}

fn default_message_min_chars() -> usize {
    5
}

fn default_message_max_chars() -> usize {
    2000
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_tls_mode() -> String {
    "starttls".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            validation: ValidationConfig::default(),
            email: EmailConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            idle_expiry_secs: default_idle_expiry_secs(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name_min_chars: default_name_min_chars(),
            name_max_chars: default_name_max_chars(),
            email_max_chars: default_email_max_chars(),
            subject_max_chars: default_subject_max_chars(),
            message_min_chars: default_message_min_chars(),
            message_max_chars: default_message_max_chars(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            tls_mode: default_tls_mode(),
            timeout_secs: default_timeout_secs(),
            sender: None,
            recipient: None,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the sliding window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Get the idle eviction threshold
    pub fn idle_expiry(&self) -> Duration {
        Duration::from_secs(self.idle_expiry_secs)
    }
}

impl EmailConfig {
    /// Get the SMTP timeout duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
