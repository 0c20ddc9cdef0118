use super::storage::CredentialStore;
use crate::error::Result;
use std::env;

/// Credential store reading `PLUTUS_<KEY>` environment variables.
pub struct EnvCredentialStore {
    prefix: String,
}

impl EnvCredentialStore {
    pub fn new() -> Self {
        Self::with_prefix("PLUTUS_")
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    pub fn var_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.to_uppercase())
    }
}

impl Default for EnvCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for EnvCredentialStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(env::var(self.var_name(key))
            .ok()
            .filter(|value| !value.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_name_uppercases_key() {
        let store = EnvCredentialStore::new();
        assert_eq!(store.var_name("id_token"), "PLUTUS_ID_TOKEN");
    }

    #[test]
    fn test_reads_prefixed_variable() {
        std::env::set_var("PLUTUS_TEST_ENV_STORE_ID_TOKEN", "abc");
        let store = EnvCredentialStore::with_prefix("PLUTUS_TEST_ENV_STORE_");
        assert_eq!(store.get_item("id_token").unwrap(), Some("abc".to_string()));
        assert_eq!(store.get_item("missing").unwrap(), None);
    }
}
