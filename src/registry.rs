// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subsumio Trust - Origin Registry
 * Canonical origin, base URL and allow-lists derived from configuration
 *
 * The registry publishes an immutable OriginSet snapshot behind a single
 * swappable reference. Reload builds a complete new snapshot and swaps
 * it in one write; readers clone the Arc and never observe a partially
 * updated state.
 *
 * Copyright 2025 Subsumio GmbH
 */

use parking_lot::RwLock;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use url::Url;

use crate::classifier::normalize_host;
use crate::config::TrustConfig;
use crate::errors::ConfigError;

/// Immutable view of the trusted-origin configuration.
#[derive(Debug, Clone)]
pub struct OriginSet {
    /// Canonical origin (scheme + host + optional port)
    pub base_origin: String,
    /// Canonical origin plus deployment sub-path, trailing slash stripped
    pub base_url: String,
    /// Origins accepted as CORS request origins and exact callback targets
    pub allowed_origins: Vec<String>,
    /// Hostnames of `allowed_origins`, for suffix-based redirect matching
    pub allowed_hosts: Vec<String>,
    /// Base URLs a server-issued redirect must stay within (origin + path prefix)
    pub redirect_allow_hosts: Vec<Url>,
    /// (hostname, derived origin) pairs for configured additional virtual hosts
    pub host_origins: Vec<(String, String)>,
}

/// Holds the current [`OriginSet`] snapshot and rebuilds it on config changes.
pub struct OriginRegistry {
    snapshot: RwLock<Arc<OriginSet>>,
}

impl OriginRegistry {
    /// Build the registry from configuration. The only fallible entry point
    /// of this crate: an unparsable or non-http(s) external URL must abort
    /// startup, since every later trust decision would inherit the mistake.
    pub fn initialize(config: &TrustConfig) -> Result<Self, ConfigError> {
        let set = build_origin_set(config)?;
        tracing::info!(
            base_url = %set.base_url,
            allowed_origins = set.allowed_origins.len(),
            "Origin registry initialized"
        );
        Ok(Self {
            snapshot: RwLock::new(Arc::new(set)),
        })
    }

    /// Recompute the snapshot from new configuration and swap it in.
    ///
    /// On failure the last-good snapshot keeps serving; the caller decides
    /// whether to surface the error (startup) or log and continue (reload).
    pub fn reload(&self, config: &TrustConfig) -> Result<(), ConfigError> {
        let set = build_origin_set(config)?;
        {
            let mut snapshot = self.snapshot.write();
            *snapshot = Arc::new(set);
        }
        tracing::info!("Origin registry reloaded");
        Ok(())
    }

    /// Current snapshot; cheap Arc clone, safe to hold across a reload.
    pub fn snapshot(&self) -> Arc<OriginSet> {
        Arc::clone(&self.snapshot.read())
    }

    /// Origin to use when building response URLs for a request.
    ///
    /// With no additional hosts configured this is always the canonical
    /// origin. Otherwise a declared Host header matching a configured
    /// additional host selects that host's derived origin; an unknown or
    /// absent host falls back to the canonical origin silently.
    pub fn resolve_request_origin(&self, host_header: Option<&str>) -> String {
        let set = self.snapshot();
        if set.host_origins.is_empty() {
            return set.base_origin.clone();
        }

        if let Some(declared) = host_header {
            // Host headers may carry a port; compare on the hostname alone.
            let declared_host = normalize_host(host_from_header(declared));
            for (host, origin) in &set.host_origins {
                if *host == declared_host {
                    return origin.clone();
                }
            }
        }

        set.base_origin.clone()
    }
}

/// Strip an optional port from a Host header value.
///
/// A bracketed IPv6 literal keeps its brackets; the port, if any, sits
/// after the closing bracket.
fn host_from_header(declared: &str) -> &str {
    if declared.starts_with('[') {
        match declared.find(']') {
            Some(end) => &declared[..=end],
            None => declared,
        }
    } else {
        match declared.rsplit_once(':') {
            Some((host, _)) => host,
            None => declared,
        }
    }
}

fn build_origin_set(config: &TrustConfig) -> Result<OriginSet, ConfigError> {
    let (base_origin, sub_path) = match config.external_url.as_deref() {
        Some(external) if !external.is_empty() => {
            let url = Url::parse(external).map_err(|e| ConfigError::InvalidExternalUrl {
                url: external.to_string(),
                reason: e.to_string(),
            })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(ConfigError::UnsupportedScheme {
                    url: external.to_string(),
                    scheme: url.scheme().to_string(),
                });
            }
            if url.host_str().is_none() {
                return Err(ConfigError::InvalidExternalUrl {
                    url: external.to_string(),
                    reason: "missing host".to_string(),
                });
            }
            (url.origin().ascii_serialization(), url.path().to_string())
        }
        _ => (
            derive_origin(&config.host, config.port, config.https),
            config.path.clone(),
        ),
    };

    let base_url = join_base_url(&base_origin, &sub_path);

    let redirect_allow_hosts = vec![Url::parse(&base_url).map_err(|e| {
        ConfigError::InvalidBaseUrl {
            host: config.host.clone(),
            reason: e.to_string(),
        }
    })?];

    let allowed_origins = match config.allowed_origins.as_deref() {
        // An explicit allow-list fully replaces the derived set.
        Some(list) if !list.trim().is_empty() => parse_origin_list(list),
        _ => {
            let mut origins = vec![base_origin.clone()];
            for host in &config.additional_hosts {
                let origin = derive_origin(host, config.port, config.https);
                if !origins.contains(&origin) {
                    origins.push(origin);
                }
            }
            origins
        }
    };

    let allowed_hosts = allowed_origins
        .iter()
        .filter_map(|origin| {
            Url::parse(origin)
                .ok()
                .and_then(|u| u.host_str().map(normalize_host))
        })
        .collect();

    let host_origins = config
        .additional_hosts
        .iter()
        .map(|host| {
            (
                normalize_host(host),
                derive_origin(host, config.port, config.https),
            )
        })
        .collect();

    Ok(OriginSet {
        base_origin,
        base_url,
        allowed_origins,
        allowed_hosts,
        redirect_allow_hosts,
        host_origins,
    })
}

/// Derive an origin string from a configured host.
///
/// The port is appended only for `localhost` and literal IPs; a named host
/// is assumed to sit behind a reverse proxy terminating TLS on the default
/// port.
fn derive_origin(host: &str, port: u16, https: bool) -> String {
    let scheme = if https { "https" } else { "http" };
    let host = normalize_host(host);
    if needs_explicit_port(&host) {
        format!("{}://{}:{}", scheme, host, port)
    } else {
        format!("{}://{}", scheme, host)
    }
}

fn needs_explicit_port(host: &str) -> bool {
    if host == "localhost" {
        return true;
    }
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    IpAddr::from_str(bare).is_ok()
}

fn join_base_url(origin: &str, path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        origin.to_string()
    } else if trimmed.starts_with('/') {
        format!("{}{}", origin, trimmed)
    } else {
        format!("{}/{}", origin, trimmed)
    }
}

/// Parse a comma-separated origin allow-list, keeping http(s) entries only
/// and de-duplicating by normalized origin while preserving order.
fn parse_origin_list(list: &str) -> Vec<String> {
    let mut origins: Vec<String> = Vec::new();
    for entry in list.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        if let Ok(url) = Url::parse(entry) {
            if url.scheme() == "http" || url.scheme() == "https" {
                let origin = url.origin().ascii_serialization();
                if !origins.contains(&origin) {
                    origins.push(origin);
                }
            }
        }
    }
    origins
}
