// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subsumio Trust - Configuration Types
 * Deployment-facing settings the origin registry is derived from
 *
 * @copyright 2025 Subsumio GmbH
 * @license Proprietary
 */

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Trust-boundary configuration.
///
/// Mirrors the server's deployment settings: either an explicit external
/// URL override, or host/port/path plus a TLS flag. The optional explicit
/// origin allow-list, when set, fully replaces the derived origins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Full externally-visible URL (e.g. behind a reverse proxy). Must be
    /// an absolute http(s) URL when present; validated at registry init.
    pub external_url: Option<String>,
    /// Hostname the server answers on when no external URL is configured
    pub host: String,
    /// Listen port; only reflected in origins for localhost/IP hosts
    pub port: u16,
    /// Deployment sub-path, e.g. "/app" for a mounted sub-application
    pub path: String,
    /// Whether the derived origin uses https
    pub https: bool,
    /// Comma-separated explicit origin allow-list; replaces derived origins
    pub allowed_origins: Option<String>,
    /// Additional virtual hosts the server answers on
    pub additional_hosts: Vec<String>,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            external_url: None,
            host: "localhost".to_string(),
            port: 3010,
            path: String::new(),
            https: false,
            allowed_origins: None,
            additional_hosts: Vec::new(),
        }
    }
}

impl TrustConfig {
    /// Load configuration from environment variables with sensible defaults
    ///
    /// Supports the following environment variables:
    /// - SUBSUMIO_EXTERNAL_URL: externally-visible base URL
    /// - SUBSUMIO_HOST / SUBSUMIO_PORT: listen host and port
    /// - SUBSUMIO_PATH: deployment sub-path
    /// - SUBSUMIO_HTTPS: "true"/"false"
    /// - SUBSUMIO_ALLOWED_ORIGINS: comma-separated origin allow-list
    /// - SUBSUMIO_ADDITIONAL_HOSTS: comma-separated virtual hosts
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(external_url) = std::env::var("SUBSUMIO_EXTERNAL_URL") {
            config.external_url = Some(external_url);
        }

        if let Ok(host) = std::env::var("SUBSUMIO_HOST") {
            config.host = host;
        }

        if let Ok(port) = std::env::var("SUBSUMIO_PORT") {
            config.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid SUBSUMIO_PORT value"))?;
        }

        if let Ok(path) = std::env::var("SUBSUMIO_PATH") {
            config.path = path;
        }

        if let Ok(https) = std::env::var("SUBSUMIO_HTTPS") {
            config.https = https
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid SUBSUMIO_HTTPS value"))?;
        }

        if let Ok(origins) = std::env::var("SUBSUMIO_ALLOWED_ORIGINS") {
            config.allowed_origins = Some(origins);
        }

        if let Ok(hosts) = std::env::var("SUBSUMIO_ADDITIONAL_HOSTS") {
            config.additional_hosts = hosts
                .split(',')
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect();
        }

        Ok(config)
    }
}
