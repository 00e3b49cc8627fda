// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Client identity extraction from proxy headers.

use axum::http::HeaderMap;

/// Identifier used when no forwarding header is present.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derive a stable client identifier from request headers.
///
/// Prefers the left-most entry of `x-forwarded-for` (the originating client
/// in a standard reverse-proxy chain), then `x-real-ip` verbatim, then the
/// literal `"unknown"`. The forwarded address is spoofable; acceptable for a
/// low-stakes contact form.
///
/// Always returns a non-empty string.
pub fn client_identifier(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        // May be a comma-separated proxy chain
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    UNKNOWN_CLIENT.to_string()
}
