//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use cartwheel_cache::Cache;
use cartwheel_commerce::{CartStore, HttpCatalog, StoreConfig};
use cartwheel_data::FetchClient;

use crate::config::CliConfig;
use crate::output::{ConsoleNotifier, Output};

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["cartwheel.toml", ".cartwheel.toml", "cartwheel.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Build a cart store from the configuration, hydrated from storage.
    pub fn cart_store(&self) -> Result<CartStore<HttpCatalog>> {
        let api = &self.config.api;
        let client = FetchClient::new()
            .with_base_url(api.base_url.as_str())
            .with_default_header("Accept", "application/json")
            .with_timeout(api.timeout());

        let storage_path = self.resolve_path(&self.config.storage.path);
        let cache = Cache::open(&storage_path)
            .with_context(|| format!("Failed to open storage: {}", storage_path.display()))?;
        tracing::debug!(
            base_url = %api.base_url,
            storage = %storage_path.display(),
            key = %self.config.storage.key,
            "building cart store"
        );
        self.output
            .debug(&format!("Using storage {}", storage_path.display()));

        Ok(CartStore::with_config(
            HttpCatalog::new(client),
            cache,
            Arc::new(ConsoleNotifier::new(self.output.clone())),
            StoreConfig {
                storage_key: self.config.storage.key.clone(),
            },
        ))
    }
}
