// Application state shared by all request handlers

use super::persistence::CompanyStore;
use crate::config::Config;
use std::path::PathBuf;

/// Main application state
///
/// Holds no company data itself; every request reads the backing file
/// through `store`.
#[derive(Debug)]
pub struct AppState {
    /// Backing-file store for the company API
    pub store: CompanyStore,
    /// Directory the table renderer reads documents from
    pub render_dir: PathBuf,
}

impl AppState {
    /// Create application state from its parts
    pub fn new(store: CompanyStore, render_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            render_dir: render_dir.into(),
        }
    }

    /// Create application state from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CompanyStore::new(&config.storage.data_file),
            &config.render.root_dir,
        )
    }
}
