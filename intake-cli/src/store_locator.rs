//! Store Locator - decide where saved rule sets live
//!
//! Precedence: `--store` flag, then the `INTAKE_STORE` environment
//! variable, then `storage.root` from the config file, then the user's data
//! directory.

use anyhow::{anyhow, Result};
use intake_core::StorageConfig;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured store directory
pub const STORE_ENV_VAR: &str = "INTAKE_STORE";

pub struct StoreLocator {
    /// Base directory for intake data (e.g., ~/.local/share/intake)
    data_dir: PathBuf,
}

impl StoreLocator {
    /// Create a new StoreLocator using the default data directory
    pub fn new() -> Result<Self> {
        let data_dir = Self::get_data_dir()?;
        Ok(Self { data_dir })
    }

    /// Get the data directory (~/.local/share/intake on all Unix platforms)
    fn get_data_dir() -> Result<PathBuf> {
        #[cfg(windows)]
        {
            let base = dirs::data_local_dir()
                .ok_or_else(|| anyhow!("Could not determine local data directory"))?;
            Ok(base.join("intake"))
        }

        #[cfg(not(windows))]
        {
            let home = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            Ok(home.join(".local").join("share").join("intake"))
        }
    }

    /// Default directory for rule sets when nothing else is configured
    pub fn rules_dir(&self) -> PathBuf {
        self.data_dir.join("rules")
    }

    /// Resolve the store directory, reading `INTAKE_STORE` from the environment
    pub fn resolve(&self, cli_override: Option<&Path>, config: &StorageConfig) -> PathBuf {
        let from_env = std::env::var_os(STORE_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self.resolve_with_env(cli_override, from_env, config)
    }

    fn resolve_with_env(
        &self,
        cli_override: Option<&Path>,
        from_env: Option<PathBuf>,
        config: &StorageConfig,
    ) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or(from_env)
            .or_else(|| config.root.clone())
            .unwrap_or_else(|| self.rules_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> StoreLocator {
        StoreLocator {
            data_dir: PathBuf::from("/data/intake"),
        }
    }

    #[test]
    fn test_flag_wins() {
        let config = StorageConfig {
            root: Some(PathBuf::from("/config/rules")),
        };
        let resolved = locator().resolve_with_env(
            Some(Path::new("/flag/rules")),
            Some(PathBuf::from("/env/rules")),
            &config,
        );
        assert_eq!(resolved, PathBuf::from("/flag/rules"));
    }

    #[test]
    fn test_env_beats_config() {
        let config = StorageConfig {
            root: Some(PathBuf::from("/config/rules")),
        };
        let resolved = locator().resolve_with_env(None, Some(PathBuf::from("/env/rules")), &config);
        assert_eq!(resolved, PathBuf::from("/env/rules"));
    }

    #[test]
    fn test_falls_back_to_data_dir() {
        let resolved = locator().resolve_with_env(None, None, &StorageConfig::default());
        assert_eq!(resolved, PathBuf::from("/data/intake/rules"));
    }
}
