use super::models::{Record, StatementsEnvelope};
use crate::error::{PlutusError, Result};
use serde_json::Value;

/// Interpret a decoded body as a JSON array of objects
pub fn records_from_array(value: Value) -> Result<Vec<Record>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(PlutusError::DecodeError(format!(
                "expected a JSON array of records, got {}",
                kind_of(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(PlutusError::DecodeError(format!(
                "record {} is {}, expected an object",
                index,
                kind_of(&other)
            ))),
        })
        .collect()
}

/// Unwrap a GraphQL response into the statements envelope.
///
/// GraphQL reports failures with HTTP 200 and an `errors` array, so those are
/// surfaced before the `data` field is looked at.
pub fn statements_from_envelope(value: Value) -> Result<StatementsEnvelope> {
    if let Some(message) = first_graphql_error(&value) {
        return Err(PlutusError::DecodeError(format!(
            "GraphQL error: {}",
            message
        )));
    }

    if value.get("data").is_none() {
        return Err(PlutusError::DecodeError(
            "no data in GraphQL response".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        PlutusError::DecodeError(format!("malformed transactions_view envelope ({})", e))
    })
}

fn first_graphql_error(value: &Value) -> Option<String> {
    let errors = value.get("errors")?.as_array()?;
    let first = errors.first()?;
    Some(
        first
            .get("message")
            .and_then(|m| m.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| first.to_string()),
    )
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
