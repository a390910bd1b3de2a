//! Application configuration
//!
//! Defaults come from the platform data directories; `FYF_DATA_DIR`,
//! `FYF_LOG_DIR` and `FYF_STORAGE_KEY` override them.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::domain::{DomainError, DomainResult};

pub const APP_NAME: &str = "FileYourFacts";
pub const DEFAULT_STORAGE_KEY: &str = "fyf-todos";

pub const ENV_DATA_DIR: &str = "FYF_DATA_DIR";
pub const ENV_LOG_DIR: &str = "FYF_LOG_DIR";
pub const ENV_STORAGE_KEY: &str = "FYF_STORAGE_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Used as the log file name
    pub app_name: String,
    /// Key of the storage slot holding the todo collection
    pub storage_key: String,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Config rooted at `data_dir`, logging to `data_dir/logs`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            app_name: APP_NAME.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_dir: data_dir.join("logs"),
            data_dir,
        }
    }

    /// Config using the platform's per-user data directory.
    pub fn from_project_dirs() -> DomainResult<Self> {
        let proj = ProjectDirs::from("com", "fyf", APP_NAME)
            .ok_or_else(|| DomainError::Storage("unable to resolve project dirs".to_string()))?;
        let mut config = Self::new(proj.data_dir());
        config.log_dir = proj.data_local_dir().join("logs");
        Ok(config)
    }

    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config reading overrides through `lookup`.
    ///
    /// Empty or whitespace-only values count as unset.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = match get(ENV_DATA_DIR) {
            Some(dir) => Self::new(dir),
            None => Self::from_project_dirs()?,
        };
        if let Some(dir) = get(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(key) = get(ENV_STORAGE_KEY) {
            config.storage_key = key;
        }
        Ok(config)
    }
}
