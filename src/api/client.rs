use crate::credential::{bearer_token, CredentialStore};
use crate::error::{PlutusError, Result};
use crate::ui::{trace, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::plutus::Endpoints;

/// HTTP verbs the client is willing to send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl FromStr for Method {
    type Err = PlutusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            "patch" => Ok(Method::Patch),
            "delete" => Ok(Method::Delete),
            _ => Err(PlutusError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the response body should be handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeAs {
    Json,
    Text,
    #[default]
    Raw,
}

pub enum Decoded {
    Json(Value),
    Text(String),
    /// Unconsumed response, left for the caller to read
    Raw(reqwest::Response),
}

impl Decoded {
    /// Turn any variant into a JSON value, parsing the body if needed
    pub async fn into_json(self) -> Result<Value> {
        match self {
            Decoded::Json(value) => Ok(value),
            Decoded::Text(text) => Ok(serde_json::from_str(&text)?),
            Decoded::Raw(response) => {
                let text = response.text().await?;
                Ok(serde_json::from_str(&text)?)
            }
        }
    }
}

pub struct PlutusClient {
    http: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
    endpoints: Endpoints,
    fail_on_status: bool,
    verbose: bool,
}

impl PlutusClient {
    pub fn new(credentials: Arc<dyn CredentialStore>, endpoints: Endpoints) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            credentials,
            endpoints,
            fail_on_status: false,
            verbose: false,
        })
    }

    /// Reject non-2xx responses before they are decoded
    pub fn fail_on_status(mut self, enabled: bool) -> Self {
        self.fail_on_status = enabled;
        self
    }

    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub(crate) fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Send one authenticated request.
    ///
    /// `method` is matched case-insensitively against GET, POST, PUT, PATCH
    /// and DELETE; anything else fails with `UnsupportedMethod` before a
    /// connection is made. The body is only sent for non-GET requests and only
    /// when it has at least one entry.
    pub async fn request(
        &self,
        method: &str,
        url: &str,
        body: Option<&Map<String, Value>>,
        decode_as: DecodeAs,
    ) -> Result<Decoded> {
        let method = match method.parse::<Method>() {
            Ok(method) => method,
            Err(e) => {
                warn(&e.to_string());
                return Err(e);
            }
        };

        let token = bearer_token(self.credentials.as_ref())?;
        let headers = build_headers(&token)?;

        let mut request = self
            .http
            .request(method.to_reqwest(), url)
            .headers(headers);

        if let Some(payload) = request_payload(method, body)? {
            request = request.body(payload);
        }

        trace(self.verbose, &format!("{} {}", method, url));
        let response = request.send().await?;
        trace(
            self.verbose,
            &format!("Response status: {}", response.status()),
        );

        if self.fail_on_status && !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PlutusError::ApiError { status, message });
        }

        match decode_as {
            DecodeAs::Json => {
                let text = response.text().await?;
                let value = serde_json::from_str(&text).map_err(|e| {
                    PlutusError::DecodeError(format!("body is not valid JSON ({})", e))
                })?;
                Ok(Decoded::Json(value))
            }
            DecodeAs::Text => Ok(Decoded::Text(response.text().await?)),
            DecodeAs::Raw => Ok(Decoded::Raw(response)),
        }
    }

    pub async fn get(&self, url: &str, decode_as: DecodeAs) -> Result<Decoded> {
        self.request("get", url, None, decode_as).await
    }

    pub async fn post(
        &self,
        url: &str,
        body: &Map<String, Value>,
        decode_as: DecodeAs,
    ) -> Result<Decoded> {
        self.request("post", url, Some(body), decode_as).await
    }
}

fn build_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            PlutusError::ConfigError(format!("Invalid authorization header: {}", e))
        })?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn request_payload(method: Method, body: Option<&Map<String, Value>>) -> Result<Option<String>> {
    match body {
        Some(body) if method != Method::Get && !body.is_empty() => {
            Ok(Some(serde_json::to_string(body)?))
        }
        _ => Ok(None),
    }
}
