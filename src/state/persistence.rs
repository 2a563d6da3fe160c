// Company dataset persistence
// Loads and saves the whole dataset to a single JSON backing file

use super::company::Dataset;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

/// Error types for persistence operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file is not a valid dataset document
    #[error("Invalid JSON structure: {0}")]
    DataCorrupt(#[source] serde_json::Error),
    /// The dataset could not be encoded
    #[error("Failed to encode dataset: {0}")]
    Encode(#[source] serde_json::Error),
    /// File I/O error
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File the operation was acting on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// File-backed company store
///
/// Every call re-reads the backing file; nothing is cached. Writers are
/// serialized within this process through `modify`.
#[derive(Debug)]
pub struct CompanyStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CompanyStore {
    /// Create a store over the given backing file (which need not exist yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset
    ///
    /// # Returns
    /// * `Ok(Dataset)` - the stored dataset, or an empty one if the file is absent
    /// * `Err(StoreError::DataCorrupt)` - the file is not a valid dataset document
    pub fn load(&self) -> Result<Dataset, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Dataset::default()),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&json).map_err(StoreError::DataCorrupt)
    }

    /// Overwrite the backing file with `dataset`
    ///
    /// The document is written to a sibling temporary file first and renamed
    /// over the backing file, so readers never see a partial document.
    pub fn save(&self, dataset: &Dataset) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(dataset).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, json).map_err(|e| self.io_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(
            path = %self.path.display(),
            companies = dataset.companies.len(),
            "Saved dataset"
        );
        Ok(())
    }

    /// Load, apply `operation`, and save, holding the write lock throughout
    ///
    /// Nothing is written when `operation` fails.
    pub async fn modify<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut Dataset) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut dataset = self.load()?;
        let output = operation(&mut dataset)?;
        self.save(&dataset)?;
        Ok(output)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::company::Company;
    use serde_json::json;
    use tempfile::{tempdir, NamedTempFile};

    fn acme() -> Company {
        serde_json::from_value(json!({
            "Company": "Acme Freight",
            "Services": "Truckload",
            "Hubs": {"Hub": ["Zürich"]},
            "Revenue": "12",
            "HomePage": "",
            "Logo": ""
        }))
        .unwrap()
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let dir = tempdir().unwrap();
        let store = CompanyStore::new(dir.path().join("missing.json"));

        // Should return an empty dataset for a non-existent file
        let dataset = store.load().unwrap();
        assert!(dataset.companies.is_empty());
    }

    #[test]
    fn test_load_unreadable_path_is_io_error() {
        let dir = tempdir().unwrap();
        // A directory exists at the path but cannot be read as a file
        let err = CompanyStore::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_load_after_file_removed() {
        let temp_file = NamedTempFile::new().unwrap();
        let store = CompanyStore::new(temp_file.path());
        temp_file.close().unwrap();

        let dataset = store.load().unwrap();
        assert_eq!(dataset, Dataset::default());
    }

    #[test]
    fn test_save_and_load_from_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let store = CompanyStore::new(temp_file.path());

        let dataset = Dataset {
            companies: vec![acme()],
            ..Default::default()
        };
        store.save(&dataset).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, dataset);
    }

    #[test]
    fn test_save_is_pretty_and_keeps_non_ascii() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("truckinglist.json");
        let store = CompanyStore::new(&path);

        store
            .save(&Dataset {
                companies: vec![acme()],
                ..Default::default()
            })
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n  \"companies\": ["));
        assert!(written.contains("Zürich"));
        assert!(!dir.path().join("truckinglist.json.tmp").exists());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"companies\": [").unwrap();

        let err = CompanyStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::DataCorrupt(_)));
        assert!(err.to_string().starts_with("Invalid JSON structure:"));
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shape.json");
        std::fs::write(&path, r#"{"companies": "none"}"#).unwrap();

        let err = CompanyStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::DataCorrupt(_)));
    }

    #[tokio::test]
    async fn test_modify_does_not_save_on_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = CompanyStore::new(&path);

        let result: Result<(), StoreError> = store
            .modify(|dataset| {
                dataset.companies.push(acme());
                Err(StoreError::Io {
                    path: path.clone(),
                    source: io::Error::new(io::ErrorKind::Other, "rejected"),
                })
            })
            .await;

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_modify_persists_changes() {
        let dir = tempdir().unwrap();
        let store = CompanyStore::new(dir.path().join("nested").join("data.json"));

        let count: Result<usize, StoreError> = store
            .modify(|dataset| {
                dataset.companies.push(acme());
                Ok(dataset.companies.len())
            })
            .await;

        assert_eq!(count.unwrap(), 1);
        assert_eq!(store.load().unwrap().companies, vec![acme()]);
    }
}
