use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub rewards_endpoint: Option<String>,
    #[serde(default)]
    pub graphql_endpoint: Option<String>,
    #[serde(default)]
    pub fail_on_status: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// JSON dump of the web app's local storage
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}
