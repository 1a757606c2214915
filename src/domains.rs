// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subsumio Trust - Trusted External Domains
 * Hard-coded second-level domains acceptable as redirect targets
 *
 * These domains are valid destinations for the app-internal bounce page
 * (payments, support, source hosting, social) and for the Subsumio
 * marketing sites. They are never acceptable as CORS origins.
 *
 * Copyright 2025 Subsumio GmbH
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

static TRUSTED_EXTERNAL_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Payments
        "stripe.com",
        "paypal.com",
        // Source hosting
        "github.com",
        "gitlab.com",
        // Social / community
        "twitter.com",
        "x.com",
        "linkedin.com",
        "youtube.com",
        "discord.gg",
        "discord.com",
        "t.me",
        // Subsumio marketing and docs
        "subsumio.com",
        "subsumio.de",
        "subsumio.io",
    ]
    .into_iter()
    .collect()
});

/// Suffix match of a normalized hostname against one trusted domain.
///
/// `host` must already be lower-cased with any trailing dot stripped.
/// `notgithub.com` does not match `github.com`; `www.github.com` does.
pub fn host_matches_domain(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

/// True if the hostname is (a subdomain of) a trusted external domain.
pub fn is_trusted_external_host(host: &str) -> bool {
    TRUSTED_EXTERNAL_DOMAINS
        .iter()
        .any(|domain| host_matches_domain(host, domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_subdomain_match() {
        assert!(is_trusted_external_host("github.com"));
        assert!(is_trusted_external_host("www.github.com"));
        assert!(is_trusted_external_host("checkout.stripe.com"));
    }

    #[test]
    fn test_lookalike_hosts_rejected() {
        assert!(!is_trusted_external_host("notgithub.com"));
        assert!(!is_trusted_external_host("githubfake.com"));
        assert!(!is_trusted_external_host("github.com.evil.net"));
    }

    #[test]
    fn test_marketing_domains() {
        assert!(is_trusted_external_host("subsumio.de"));
        assert!(is_trusted_external_host("blog.subsumio.com"));
    }
}
