use crate::api::Record;
use crate::error::{PlutusError, Result};
use serde_json::Value;

/// What a cell becomes when its field is null or absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fill {
    Literal(String),
    Reject,
}

impl Fill {
    pub fn empty() -> Self {
        Fill::Literal(String::new())
    }
}

/// Per-table rules for null and absent fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPolicy {
    pub on_null: Fill,
    pub on_missing: Fill,
}

impl CellPolicy {
    /// Null renders empty, an absent field is an error
    pub fn strict() -> Self {
        Self {
            on_null: Fill::empty(),
            on_missing: Fill::Reject,
        }
    }

    /// Null and absent both render empty
    pub fn lenient() -> Self {
        Self {
            on_null: Fill::empty(),
            on_missing: Fill::empty(),
        }
    }
}

impl Default for CellPolicy {
    fn default() -> Self {
        Self::strict()
    }
}

/// Column names taken from the first record, in its key order, minus `excluded`
pub fn derive_columns(first: &Record, excluded: &[&str]) -> Vec<String> {
    first
        .keys()
        .filter(|key| !excluded.contains(&key.as_str()))
        .cloned()
        .collect()
}

/// Textual form of a single value
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => render_number(n),
        // booleans and nested structures keep their JSON spelling
        other => other.to_string(),
    }
}

/// Floats are written in plain decimal notation, whole ones without a
/// fractional part (`10.0` -> `10`); exponent form only from 1e21 up
fn render_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => {
            if f == 0.0 {
                "0".to_string()
            } else if f.fract() == 0.0 && f.abs() < 1e21 {
                format!("{:.0}", f)
            } else if f.abs() >= 1e21 {
                format!("{:e}", f)
            } else {
                format!("{}", f)
            }
        }
        _ => n.to_string(),
    }
}

/// Header plus one row per record, all of the same width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Project `records` onto columns derived from the first record.
    ///
    /// Fails with `EmptyResult` when there is no first record to take the
    /// columns from.
    pub fn from_records(
        dataset: &str,
        records: &[Record],
        excluded: &[&str],
        policy: &CellPolicy,
    ) -> Result<Self> {
        let first = records.first().ok_or_else(|| PlutusError::EmptyResult {
            dataset: dataset.to_string(),
        })?;
        let columns = derive_columns(first, excluded);

        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| project(index, record, &columns, policy))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows, header excluded
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header row followed by the data rows
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        std::iter::once(self.columns.clone())
            .chain(self.rows.iter().cloned())
            .collect()
    }
}

fn project(
    index: usize,
    record: &Record,
    columns: &[String],
    policy: &CellPolicy,
) -> Result<Vec<String>> {
    columns
        .iter()
        .map(|column| {
            let fill = match record.get(column) {
                Some(Value::Null) => &policy.on_null,
                Some(value) => return Ok(render_value(value)),
                None => &policy.on_missing,
            };
            match fill {
                Fill::Literal(text) => Ok(text.clone()),
                Fill::Reject => Err(PlutusError::MissingField {
                    row: index,
                    column: column.clone(),
                }),
            }
        })
        .collect()
}
