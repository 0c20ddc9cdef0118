//! Conversion of reward records into the ChainReport import format.
//!
//! ChainReport expects `;`-separated rows with German column names, one row
//! per cashback credit in PLU.

use crate::api::Record;
use crate::error::{PlutusError, Result};
use chrono::NaiveDateTime;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::Value;

use super::table::render_value;

pub const CHAINREPORT_FILENAME: &str = "plutus-rewards-chainreport.csv";

pub const CHAINREPORT_HEADER: [&str; 10] = [
    "Zeitpunkt",
    "Transaktions Typ",
    "Anzahl Eingang",
    "Währung Eingang",
    "Anzahl Ausgang",
    "Währung Ausgang",
    "Transaktionsgebühr",
    "Währung Transaktionsgebühr",
    "Oder-ID der Exchange",
    "Beschreibung",
];

/// Reward types booked as cashback; `REBATE_BONUS` covers manual corrections
pub const CASHBACK_TYPES: [&str; 2] = ["DAILY_REBATE_DISTRIBUTION", "REBATE_BONUS"];

pub const CASHBACK: &str = "Cashback";
/// Transaction type written for rewards that could not be classified
pub const UNKNOWN_TYPE: &str = "ERROR";
pub const REWARD_CURRENCY: &str = "PLU";

const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const CHAINREPORT_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainreportReport {
    pub rows: Vec<Vec<String>>,
    /// Rows written with type `ERROR`
    pub unknown: usize,
    /// Records dropped because their type was blank
    pub skipped: usize,
}

impl ChainreportReport {
    /// `;`-separated text with a header line and CRLF line endings
    pub fn render(&self) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .delimiter(b';')
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());
        writer.write_record(CHAINREPORT_HEADER)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| PlutusError::Other(format!("Failed to flush ChainReport rows: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| PlutusError::Other(format!("ChainReport rows are not valid UTF-8: {}", e)))
    }
}

pub fn convert_rewards(rewards: &[Record]) -> Result<ChainreportReport> {
    if rewards.is_empty() {
        return Err(PlutusError::EmptyResult {
            dataset: "rewards".to_string(),
        });
    }

    let mut report = ChainreportReport::default();
    for (index, reward) in rewards.iter().enumerate() {
        let reward_type = match reward.get("type") {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Null) | None => return Err(missing(index, "type")),
            Some(other) => render_value(other),
        };
        if reward_type.is_empty() {
            report.skipped += 1;
            continue;
        }

        let transaction_type = if CASHBACK_TYPES.contains(&reward_type.to_uppercase().as_str()) {
            CASHBACK
        } else {
            report.unknown += 1;
            UNKNOWN_TYPE
        };

        report.rows.push(vec![
            date_string(index, reward)?,
            transaction_type.to_string(),
            received_amount(index, reward)?,
            REWARD_CURRENCY.to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            text_field(index, reward, &["statement_id", "exchange_rate_id"])?,
            text_field(index, reward, &["reference_type", "description"])?,
        ]);
    }
    Ok(report)
}

fn missing(row: usize, column: &str) -> PlutusError {
    PlutusError::MissingField {
        row,
        column: column.to_string(),
    }
}

fn date_string(index: usize, reward: &Record) -> Result<String> {
    let created_at = reward
        .get("createdAt")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing(index, "createdAt"))?;
    let parsed = NaiveDateTime::parse_from_str(created_at, CREATED_AT_FORMAT).map_err(|e| {
        PlutusError::DecodeError(format!(
            "record {} has an invalid createdAt {:?} ({})",
            index, created_at, e
        ))
    })?;
    Ok(parsed.format(CHAINREPORT_DATE_FORMAT).to_string())
}

/// PLU amount with a decimal comma; `amount` wins over `reward_plu_value`
fn received_amount(index: usize, reward: &Record) -> Result<String> {
    let value = ["amount", "reward_plu_value"]
        .iter()
        .find_map(|key| reward.get(*key))
        .filter(|v| !v.is_null())
        .ok_or_else(|| missing(index, "reward_plu_value"))?;
    Ok(render_value(value).trim().replace('.', ","))
}

/// First present key of `keys`; non-string values become empty
fn text_field(index: usize, reward: &Record, keys: &[&str]) -> Result<String> {
    let value = keys
        .iter()
        .find_map(|key| reward.get(*key))
        .ok_or_else(|| missing(index, keys[keys.len() - 1]))?;
    Ok(match value {
        Value::String(s) => s.trim().to_string(),
        _ => String::new(),
    })
}
