use super::storage::CredentialStore;
use crate::error::{PlutusError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// Credential store backed by a JSON dump of the browser's local storage,
/// e.g. `{"id_token": "eyJ..."}`.
///
/// The file is re-read on every lookup so a token refreshed in the file is
/// picked up without restarting.
pub struct LocalStorageFile {
    path: PathBuf,
}

impl LocalStorageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        let content = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content)?;
        match value {
            Value::Object(entries) => Ok(entries),
            _ => Err(PlutusError::ConfigError(format!(
                "Credentials file {} must contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl CredentialStore for LocalStorageFile {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        Ok(match entries.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            // local storage only holds strings; keep anything else as its JSON text
            Some(other) => Some(other.to_string()),
        })
    }
}
