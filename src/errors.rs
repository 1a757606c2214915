// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subsumio Trust - Error Types
 * Configuration-time errors for the origin trust boundary
 *
 * @copyright 2025 Subsumio GmbH
 * @license Proprietary
 */

use thiserror::Error;

/// Errors raised while building the origin registry from configuration.
///
/// These are the only errors this crate surfaces. Per-request checks
/// (classification, callback/redirect/CORS decisions) never fail; they
/// resolve invalid input to a deny or a fallback URL.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configured external URL override could not be parsed
    #[error("Invalid external URL '{url}': {reason}")]
    InvalidExternalUrl { url: String, reason: String },

    /// The external URL override uses a scheme other than http/https
    #[error("Unsupported scheme '{scheme}' in external URL '{url}'")]
    UnsupportedScheme { url: String, scheme: String },

    /// The derived base URL did not round-trip through URL parsing
    #[error("Could not derive a base URL from host '{host}': {reason}")]
    InvalidBaseUrl { host: String, reason: String },
}
