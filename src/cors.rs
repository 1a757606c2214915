// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subsumio Trust - CORS Origin Gate
 * Allow/deny decision for the HTTP layer's CORS negotiation hook
 *
 * Framework-neutral on purpose: the server adapter maps the returned
 * header pairs onto its response type. A denied origin produces no CORS
 * headers at all; the browser enforces the resulting failure.
 *
 * Copyright 2025 Subsumio GmbH
 */

use crate::policy::RedirectPolicy;

pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
pub const VARY: &str = "Vary";

/// CORS response headers for one allowed request.
#[derive(Debug, Clone, PartialEq)]
pub struct CorsHeaders {
    /// The request's own origin, reflected back verbatim. Never `*`:
    /// credentialed requests forbid the wildcard and we never want it.
    pub allow_origin: String,
}

impl CorsHeaders {
    /// Header name/value pairs to set on the response.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone()),
            (ACCESS_CONTROL_ALLOW_CREDENTIALS, "true".to_string()),
            (VARY, "Origin".to_string()),
        ]
    }
}

/// Thin consumer of [`RedirectPolicy::is_trusted_request_origin`].
#[derive(Clone)]
pub struct CorsGate {
    policy: RedirectPolicy,
}

impl CorsGate {
    pub fn new(policy: RedirectPolicy) -> Self {
        Self { policy }
    }

    /// Decide CORS for one request. `None` means omit all CORS headers.
    ///
    /// A request without an Origin header is a non-browser client; it is
    /// allowed through but needs no CORS headers either.
    pub fn check(&self, origin_header: Option<&str>) -> Option<CorsHeaders> {
        let origin = origin_header?;
        if self.policy.is_trusted_request_origin(Some(origin)) {
            Some(CorsHeaders {
                allow_origin: origin.to_string(),
            })
        } else {
            tracing::debug!(origin = %origin, "CORS headers omitted for untrusted origin");
            None
        }
    }
}
