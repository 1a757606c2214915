// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subsumio Trust - Redirect Decision Service
 * Policy checks over the origin registry and URL classifier
 *
 * Three related call-site questions: is this a safe callback URL to
 * embed in a link, is this a safe OAuth/app redirect target, and where
 * may a server-issued redirect actually send the browser. All checks
 * are total and fail closed; a parse failure is a deny, never an error.
 *
 * Copyright 2025 Subsumio GmbH
 */

use percent_encoding::percent_decode_str;
use std::sync::Arc;
use url::Url;

use crate::classifier::{classify, Classification};
use crate::domains::{host_matches_domain, is_trusted_external_host};
use crate::registry::OriginRegistry;

/// Policy layer over an [`OriginRegistry`]. Cheap to clone; every check
/// reads a fresh registry snapshot, so decisions made after a config
/// reload use the new origin set.
#[derive(Clone)]
pub struct RedirectPolicy {
    registry: Arc<OriginRegistry>,
}

impl RedirectPolicy {
    pub fn new(registry: Arc<OriginRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &OriginRegistry {
        &self.registry
    }

    /// Is `raw` safe to embed as a "return to" link in a generated page?
    ///
    /// Strict check: internal paths pass, absolute URLs must match one of
    /// the allowed origins exactly (scheme, host and port).
    pub fn is_allowed_callback_url(&self, raw: &str) -> bool {
        match classify(raw) {
            Classification::RelativeInternal => true,
            Classification::Absolute { url, .. } => {
                let origin = url.origin().ascii_serialization();
                self.registry
                    .snapshot()
                    .allowed_origins
                    .iter()
                    .any(|allowed| *allowed == origin)
            }
            _ => false,
        }
    }

    /// Is `raw` an acceptable OAuth/app redirect target?
    ///
    /// Looser than the callback check: hostname-only matching, and the
    /// static trusted external domains (payments, support, social) are
    /// acceptable in addition to the app's own hosts. This guards the
    /// app-internal bounce page, not markup embedding.
    pub fn is_allowed_redirect_target(&self, raw: &str) -> bool {
        match classify(raw) {
            Classification::RelativeInternal => true,
            Classification::Absolute { host, .. } => {
                let set = self.registry.snapshot();
                let allowed = set
                    .allowed_hosts
                    .iter()
                    .any(|own| host_matches_domain(&host, own))
                    || is_trusted_external_host(&host);
                if !allowed {
                    tracing::debug!(host = %host, "Rejected redirect target");
                }
                allowed
            }
            _ => false,
        }
    }

    /// Resolve a raw (possibly percent-encoded) redirect candidate into a
    /// URL the server may actually issue, or the base-URL home fallback.
    ///
    /// The resolved URL must match BOTH the origin and the path prefix of
    /// a configured redirect allow-host; same-origin-but-wrong-subpath
    /// input does not satisfy a mounted sub-application's scope. Trusted
    /// external domains deliberately play no part here. Decode and parse
    /// failures are indistinguishable from untrusted input: both fall
    /// back to home.
    pub fn safe_redirect(&self, candidate: &str, request_base_origin: &str) -> String {
        let set = self.registry.snapshot();
        let fallback = set.base_url.clone();

        let decoded = match percent_decode_str(candidate).decode_utf8() {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => return fallback,
        };

        let base = match Url::parse(request_base_origin) {
            Ok(base) => base,
            Err(_) => return fallback,
        };

        let resolved = match base.join(&decoded) {
            Ok(resolved) => resolved,
            Err(_) => return fallback,
        };

        for allow_host in &set.redirect_allow_hosts {
            if resolved.origin() == allow_host.origin()
                && resolved.path().starts_with(allow_host.path())
            {
                let resolved = resolved.to_string();
                return resolved
                    .strip_suffix('/')
                    .map(str::to_string)
                    .unwrap_or(resolved);
            }
        }

        tracing::debug!(candidate = %candidate, "Redirect outside allow-hosts, falling back to base URL");
        fallback
    }

    /// CORS allow predicate: an absent Origin header is a non-browser
    /// client and passes; a present one must be an exact member of the
    /// allowed origins. Never suffix-matched.
    pub fn is_trusted_request_origin(&self, origin_header: Option<&str>) -> bool {
        match origin_header {
            None => true,
            Some(origin) => self
                .registry
                .snapshot()
                .allowed_origins
                .iter()
                .any(|allowed| allowed == origin),
        }
    }
}
