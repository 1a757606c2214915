// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

pub mod core;
pub mod loader;

pub use core::TrustConfig;
pub use loader::{ConfigFormat, ConfigLoader, HotReloadManager};
