use crate::error::Result;

/// Read-only key/value store holding the bearer token
pub trait CredentialStore: Send + Sync {
    /// Look up a value by key. `Ok(None)` means the key is not present.
    fn get_item(&self, key: &str) -> Result<Option<String>>;
}
