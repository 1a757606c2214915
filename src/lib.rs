// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subsumio Trust - Origin/Redirect Trust Boundary
 * Exposes the origin registry, URL classifier and redirect policy
 *
 * Library-level trust boundary shared by the web server's CORS hook,
 * OAuth callback handlers and the desktop shell's navigation guard.
 *
 * @copyright 2025 Subsumio GmbH
 * @license Proprietary
 */

pub mod classifier;
pub mod config;
pub mod cors;
pub mod deeplink;
pub mod domains;
pub mod errors;
pub mod policy;
pub mod registry;

pub use classifier::{classify, Classification};
pub use config::{ConfigLoader, HotReloadManager, TrustConfig};
pub use cors::{CorsGate, CorsHeaders};
pub use deeplink::{allow_deeplink_navigation, extract_redirect_uri};
pub use domains::is_trusted_external_host;
pub use errors::ConfigError;
pub use policy::RedirectPolicy;
pub use registry::{OriginRegistry, OriginSet};
