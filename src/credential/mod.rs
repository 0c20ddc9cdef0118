mod env;
mod filesystem;
mod storage;

pub use env::EnvCredentialStore;
pub use filesystem::LocalStorageFile;
pub use storage::CredentialStore;

use crate::error::{PlutusError, Result};

/// Key under which the web app keeps its bearer token
pub const ID_TOKEN_KEY: &str = "id_token";

/// A token handed over directly, e.g. from `--token`
pub struct StaticCredential {
    token: String,
}

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CredentialStore for StaticCredential {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if key == ID_TOKEN_KEY {
            Ok(Some(self.token.clone()))
        } else {
            Ok(None)
        }
    }
}

/// Read the bearer token from a store, failing if it is absent
pub fn bearer_token(store: &dyn CredentialStore) -> Result<String> {
    store
        .get_item(ID_TOKEN_KEY)?
        .ok_or_else(|| PlutusError::MissingCredential {
            key: ID_TOKEN_KEY.to_string(),
        })
}
