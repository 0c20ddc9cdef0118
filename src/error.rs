use std::fmt;

#[derive(Debug)]
pub enum PlutusError {
    UnsupportedMethod(String),
    ApiError {
        status: u16,
        message: String,
    },
    EmptyResult {
        dataset: String,
    },
    MissingField {
        row: usize,
        column: String,
    },
    MissingCredential {
        key: String,
    },
    ConfigError(String),
    DecodeError(String),
    NetworkError(reqwest::Error),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    Other(String),
}

impl fmt::Display for PlutusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlutusError::UnsupportedMethod(method) => {
                write!(f, "Unsupported request method \"{}\"", method)
            }
            PlutusError::ApiError { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            PlutusError::EmptyResult { dataset } => {
                write!(f, "No {} returned, nothing to export", dataset)
            }
            PlutusError::MissingField { row, column } => {
                write!(f, "Record {} has no value for field \"{}\"", row, column)
            }
            PlutusError::MissingCredential { key } => {
                write!(f, "No credential found under key \"{}\"", key)
            }
            PlutusError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            PlutusError::DecodeError(msg) => write!(f, "Unexpected response: {}", msg),
            PlutusError::NetworkError(e) => write!(f, "Network error: {}", e),
            PlutusError::IoError(e) => write!(f, "IO error: {}", e),
            PlutusError::JsonError(e) => write!(f, "JSON error: {}", e),
            PlutusError::CsvError(e) => write!(f, "CSV error: {}", e),
            PlutusError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PlutusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlutusError::NetworkError(e) => Some(e),
            PlutusError::IoError(e) => Some(e),
            PlutusError::JsonError(e) => Some(e),
            PlutusError::CsvError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PlutusError {
    fn from(err: reqwest::Error) -> Self {
        PlutusError::NetworkError(err)
    }
}

impl From<std::io::Error> for PlutusError {
    fn from(err: std::io::Error) -> Self {
        PlutusError::IoError(err)
    }
}

impl From<serde_json::Error> for PlutusError {
    fn from(err: serde_json::Error) -> Self {
        PlutusError::JsonError(err)
    }
}

impl From<csv::Error> for PlutusError {
    fn from(err: csv::Error) -> Self {
        PlutusError::CsvError(err)
    }
}

impl From<anyhow::Error> for PlutusError {
    fn from(err: anyhow::Error) -> Self {
        PlutusError::ConfigError(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, PlutusError>;
