//! Key-value settings file.
//!
//! The file is a single JSON object. Each key holds one value; `null` and a
//! missing key both read back as absent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Default location of the settings file, relative to the working directory.
pub(crate) const DEFAULT_STORE_PATH: &str = ".cms-tester.json";

/// Error reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for key {key}: {source}")]
    Value {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(self.io_error(err)),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, values: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let raw = serde_json::to_string_pretty(values).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, raw + "\n").map_err(|err| self.io_error(err))?;
        debug!(path = %self.path.display(), "settings written");
        Ok(())
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.read_all()?.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StoreError::Value {
                    key: key.to_owned(),
                    source,
                }),
        }
    }

    pub(crate) fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        let value = serde_json::to_value(value).map_err(|source| StoreError::Value {
            key: key.to_owned(),
            source,
        })?;
        values.insert(key.to_owned(), value);
        self.write_all(&values)
    }

    /// Returns whether the key held a value.
    pub(crate) fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut values = self.read_all()?;
        match values.shift_remove(key) {
            Some(Value::Null) | None => Ok(false),
            Some(_) => {
                self.write_all(&values)?;
                Ok(true)
            }
        }
    }
}
