// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subsumio Trust - Configuration Loader
 * File-based config loading and hot reload for the origin registry
 *
 * @copyright 2025 Subsumio GmbH
 * @license Proprietary
 */

use anyhow::{Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use super::core::TrustConfig;
use crate::registry::{OriginRegistry, OriginSet};

pub struct ConfigLoader {
    config_path: PathBuf,
    format: ConfigFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigLoader {
    pub fn new<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let path = config_path.as_ref().to_path_buf();
        let format = Self::detect_format(&path)?;

        Ok(Self {
            config_path: path,
            format,
        })
    }

    fn detect_format(path: &Path) -> Result<ConfigFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config file format"))?;

        match extension {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}",
                extension
            )),
        }
    }

    pub fn load_config(&self) -> Result<TrustConfig> {
        let content = std::fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file: {:?}", self.config_path))?;

        let mut config: TrustConfig = match self.format {
            ConfigFormat::Yaml => {
                serde_yaml::from_str(&content).context("Failed to parse YAML config")?
            }
            ConfigFormat::Toml => {
                toml::from_str(&content).context("Failed to parse TOML config")?
            }
            ConfigFormat::Json => {
                serde_json::from_str(&content).context("Failed to parse JSON config")?
            }
        };

        self.apply_env_overrides(&mut config)?;

        Ok(config)
    }

    fn apply_env_overrides(&self, config: &mut TrustConfig) -> Result<()> {
        if let Ok(external_url) = std::env::var("SUBSUMIO_EXTERNAL_URL") {
            config.external_url = Some(external_url);
        }

        if let Ok(host) = std::env::var("SUBSUMIO_HOST") {
            config.host = host;
        }

        if let Ok(port) = std::env::var("SUBSUMIO_PORT") {
            config.port = port.parse().context("Invalid SUBSUMIO_PORT")?;
        }

        if let Ok(https) = std::env::var("SUBSUMIO_HTTPS") {
            config.https = https.parse().context("Invalid SUBSUMIO_HTTPS")?;
        }

        if let Ok(origins) = std::env::var("SUBSUMIO_ALLOWED_ORIGINS") {
            config.allowed_origins = Some(origins);
        }

        Ok(())
    }
}

/// Watches the config file and rebuilds the origin registry on change.
///
/// A failed reload (unreadable file, parse error, invalid external URL)
/// keeps the registry on its last-good snapshot; in-flight requests are
/// never exposed to a half-built origin set.
pub struct HotReloadManager {
    registry: Arc<OriginRegistry>,
    config_path: PathBuf,
    reload_tx: broadcast::Sender<Arc<OriginSet>>,
    _watcher: Option<RecommendedWatcher>,
}

impl HotReloadManager {
    pub fn new(registry: Arc<OriginRegistry>, config_path: PathBuf) -> Self {
        let (reload_tx, _) = broadcast::channel(16);

        Self {
            registry,
            config_path,
            reload_tx,
            _watcher: None,
        }
    }

    pub fn start_watching(mut self) -> Result<Self> {
        let registry = Arc::clone(&self.registry);
        let reload_tx = self.reload_tx.clone();
        let config_path = self.config_path.clone();

        let (tx, mut rx) = tokio::sync::mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

        watcher.watch(&self.config_path, RecursiveMode::NonRecursive)?;

        tokio::spawn(async move {
            use notify::EventKind;

            while let Some(event) = rx.recv().await {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    continue;
                }

                // Coalesce a write burst: drain events until the file has
                // been quiet for the debounce window, then reload once. The
                // last write of a burst always takes effect.
                while let Ok(Some(_)) =
                    tokio::time::timeout(Duration::from_millis(500), rx.recv()).await
                {}

                if let Err(e) = Self::reload_internal(&registry, &config_path, &reload_tx) {
                    tracing::error!("Failed to reload trust config: {}", e);
                }
            }
        });

        self._watcher = Some(watcher);
        Ok(self)
    }

    fn reload_internal(
        registry: &Arc<OriginRegistry>,
        config_path: &Path,
        reload_tx: &broadcast::Sender<Arc<OriginSet>>,
    ) -> Result<()> {
        let loader = ConfigLoader::new(config_path)?;
        let new_config = loader.load_config()?;

        registry.reload(&new_config)?;

        let _ = reload_tx.send(registry.snapshot());

        Ok(())
    }

    /// Trigger a reload outside the file watcher, e.g. from an admin API.
    pub fn reload_now(&self) -> Result<()> {
        Self::reload_internal(&self.registry, &self.config_path, &self.reload_tx)
    }

    pub fn registry(&self) -> Arc<OriginRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<OriginSet>> {
        self.reload_tx.subscribe()
    }
}
