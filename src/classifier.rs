// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subsumio Trust - URL Classifier
 * Structural classification of attacker-influenced URL strings
 *
 * Turns a raw candidate (redirect query parameter, Origin header,
 * deep-link URL) into a safety-relevant shape without making a policy
 * decision. Total function: parse failures become variants, never errors.
 *
 * Copyright 2025 Subsumio GmbH
 */

use url::Url;

/// Structural classification of a candidate URL string.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Starts with a single `/`; cannot change host, always structurally safe
    RelativeInternal,
    /// Empty input or failed strict URL parsing
    Malformed,
    /// Parsed, but the scheme is not http or https
    UnsupportedScheme,
    /// Carries a non-empty username or password component; always rejected
    /// to rule out userinfo-based host confusion
    HasCredentials,
    /// Absolute http(s) URL with a normalized hostname
    Absolute {
        url: Url,
        /// Lower-cased, trailing-dot-stripped hostname
        host: String,
    },
}

/// Classify a raw candidate string.
///
/// Protocol-relative input (`//evil.com/x`) is deliberately parsed as an
/// absolute https URL so it goes through host checks instead of being
/// mistaken for an internal path.
pub fn classify(raw: &str) -> Classification {
    if raw.is_empty() {
        return Classification::Malformed;
    }

    if raw.starts_with('/') && !raw.starts_with("//") {
        return Classification::RelativeInternal;
    }

    let candidate = if raw.starts_with("//") {
        format!("https:{}", raw)
    } else {
        raw.to_string()
    };

    let url = match Url::parse(&candidate) {
        Ok(url) => url,
        Err(_) => return Classification::Malformed,
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Classification::UnsupportedScheme;
    }

    if !url.username().is_empty() || url.password().map_or(false, |p| !p.is_empty()) {
        return Classification::HasCredentials;
    }

    let host = match url.host_str() {
        Some(host) => normalize_host(host),
        None => return Classification::Malformed,
    };

    Classification::Absolute { url, host }
}

/// Lower-case a hostname and strip a trailing dot (FQDN form).
pub fn normalize_host(host: &str) -> String {
    host.trim_end_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_internal() {
        assert_eq!(classify("/dashboard"), Classification::RelativeInternal);
        assert_eq!(classify("/"), Classification::RelativeInternal);
        assert_eq!(
            classify("/workspace/abc?tab=files"),
            Classification::RelativeInternal
        );
    }

    #[test]
    fn test_protocol_relative_is_absolute() {
        match classify("//evil.com/x") {
            Classification::Absolute { host, url } => {
                assert_eq!(host, "evil.com");
                assert_eq!(url.scheme(), "https");
            }
            other => panic!("expected Absolute, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_and_garbage_are_malformed() {
        assert_eq!(classify(""), Classification::Malformed);
        assert_eq!(classify("not a url"), Classification::Malformed);
        assert_eq!(classify("http://"), Classification::Malformed);
    }

    #[test]
    fn test_unsupported_scheme() {
        assert_eq!(
            classify("javascript:alert(1)"),
            Classification::UnsupportedScheme
        );
        assert_eq!(classify("ftp://example.com/f"), Classification::UnsupportedScheme);
        assert_eq!(classify("file:///etc/passwd"), Classification::UnsupportedScheme);
    }

    #[test]
    fn test_credentials_rejected() {
        assert_eq!(
            classify("https://user:pw@app.example.com/"),
            Classification::HasCredentials
        );
        assert_eq!(
            classify("https://user@app.example.com/"),
            Classification::HasCredentials
        );
    }

    #[test]
    fn test_host_normalization() {
        match classify("https://App.Example.COM./path") {
            Classification::Absolute { host, .. } => assert_eq!(host, "app.example.com"),
            other => panic!("expected Absolute, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_absolute() {
        match classify("http://localhost:3010/magic-link?token=x") {
            Classification::Absolute { host, url } => {
                assert_eq!(host, "localhost");
                assert_eq!(url.port(), Some(3010));
            }
            other => panic!("expected Absolute, got {:?}", other),
        }
    }
}
