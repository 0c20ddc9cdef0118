mod api;
mod defaults;
mod export;
mod validation;

use crate::api::Endpoints;
use crate::cli::Args;
use crate::credential::{
    CredentialStore, EnvCredentialStore, LocalStorageFile, StaticCredential, ID_TOKEN_KEY,
};
use crate::error::{PlutusError, Result};
use crate::export::{DelimitedFormat, Quoting};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

pub use api::{ApiConfig, CredentialsConfig};
pub use defaults::is_truthy;
pub use export::ExportConfig;
pub use validation::expand_with;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JsonConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Where the bearer token is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Token(String),
    File(PathBuf),
    Env,
}

impl CredentialSource {
    pub fn into_store(self) -> Arc<dyn CredentialStore> {
        match self {
            CredentialSource::Token(token) => Arc::new(StaticCredential::new(token)),
            CredentialSource::File(path) => Arc::new(LocalStorageFile::new(path)),
            CredentialSource::Env => Arc::new(EnvCredentialStore::new()),
        }
    }
}

pub struct Config {
    pub credentials: CredentialSource,
    pub endpoints: Endpoints,
    pub format: DelimitedFormat,
    pub output_dir: PathBuf,
    pub to_stdout: bool,
    pub fail_on_status: bool,
    pub verbose: bool,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let json_config = JsonConfig::load()?;
        Self::resolve(args, json_config, |name| env::var(name).ok())
    }

    /// Merge CLI args > environment > config file > defaults
    pub fn resolve(
        args: &Args,
        json_config: JsonConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let expand = |value: String| expand_with(&value, &lookup);
        let env_id_token = EnvCredentialStore::new().var_name(ID_TOKEN_KEY);

        let credentials = if let Some(token) = args.token.clone() {
            CredentialSource::Token(token)
        } else if let Some(file) = args.credentials_file.clone() {
            CredentialSource::File(PathBuf::from(file))
        } else if lookup(&env_id_token).is_some_and(|v| !v.is_empty()) {
            CredentialSource::Env
        } else if let Some(file) = lookup("PLUTUS_CREDENTIALS_FILE") {
            CredentialSource::File(PathBuf::from(file))
        } else if let Some(token) = json_config.credentials.token.clone() {
            CredentialSource::Token(expand(token))
        } else if let Some(file) = json_config.credentials.file.clone() {
            CredentialSource::File(PathBuf::from(expand(file)))
        } else {
            // fails with MissingCredential on the first request
            CredentialSource::Env
        };

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            rewards: args
                .rewards_endpoint
                .clone()
                .or_else(|| lookup("PLUTUS_REWARDS_ENDPOINT"))
                .or(json_config.api.rewards_endpoint.clone().map(&expand))
                .unwrap_or(defaults.rewards),
            graphql: args
                .graphql_endpoint
                .clone()
                .or_else(|| lookup("PLUTUS_GRAPHQL_ENDPOINT"))
                .or(json_config.api.graphql_endpoint.clone().map(&expand))
                .unwrap_or(defaults.graphql),
        };

        let separator = args
            .separator
            .clone()
            .or_else(|| lookup("PLUTUS_SEPARATOR"))
            .unwrap_or(json_config.export.separator.clone());
        let quoting = if args.quote || json_config.export.quote {
            Quoting::Necessary
        } else {
            Quoting::Never
        };
        let format = DelimitedFormat::new(&separator, quoting)?;

        let output_dir = args
            .output_dir
            .clone()
            .or_else(|| lookup("PLUTUS_OUTPUT_DIR"))
            .unwrap_or_else(|| expand(json_config.export.output_dir.clone()));

        let fail_on_status =
            args.fail_on_status || json_config.api.fail_on_status.unwrap_or(false);

        let verbose = args.verbose
            || lookup("PLUTUS_VERBOSE")
                .map(|v| is_truthy(&v))
                .or(json_config.session.verbose)
                .unwrap_or(false);

        Ok(Config {
            credentials,
            endpoints,
            format,
            output_dir: PathBuf::from(output_dir),
            to_stdout: args.stdout,
            fail_on_status,
            verbose,
        })
    }
}

impl JsonConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Ok(Self::load_from(&path)?);
            }
        }

        // No config file found, return default
        Ok(JsonConfig::default())
    }

    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&contents).with_context(|| {
                format!("Failed to parse YAML config file: {}", path.display())
            })?
        } else {
            serde_json::from_str(&contents).with_context(|| {
                format!("Failed to parse JSON config file: {}", path.display())
            })?
        };
        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".plutus-export.yaml"),
            PathBuf::from(".plutus-export.yml"),
            PathBuf::from(".plutus-export.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("plutus-export");
            paths.push(config_dir.join("config.yaml"));
            paths.push(config_dir.join("config.yml"));
            paths.push(config_dir.join("config.json"));
        }

        paths
    }

    pub fn example_yaml() -> &'static str {
        r#"# plutus-export configuration
api:
  # rewards_endpoint: https://api.plutus.it/platform/transactions/pluton
  # graphql_endpoint: https://hasura.plutus.it/v1alpha1/graphql
  fail_on_status: false
export:
  separator: "|"
  quote: false
  output_dir: .
credentials:
  # JSON dump of the web app's local storage, must contain "id_token"
  # file: ${HOME}/.config/plutus-export/local-storage.json
  # token: ${PLUTUS_ID_TOKEN}
session:
  verbose: false
"#
    }

    /// Write the example config into the current directory
    pub fn init() -> Result<PathBuf> {
        let path = PathBuf::from(".plutus-export.yaml");
        Self::init_at(&path)?;
        Ok(path)
    }

    /// Write the example config to `path`, refusing to replace an existing file
    pub fn init_at(path: &std::path::Path) -> Result<()> {
        if path.exists() {
            return Err(PlutusError::ConfigError(format!(
                "{} already exists",
                path.display()
            )));
        }
        fs::write(path, Self::example_yaml())?;
        Ok(())
    }
}
