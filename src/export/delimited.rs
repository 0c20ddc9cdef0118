use crate::error::{PlutusError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const DEFAULT_SEPARATOR: &str = "|";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// Cells are written verbatim; a separator inside a cell is not escaped
    #[default]
    Never,
    /// Cells holding the separator, a quote or a newline are quoted
    Necessary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedFormat {
    pub separator: String,
    pub quoting: Quoting,
}

impl Default for DelimitedFormat {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            quoting: Quoting::Never,
        }
    }
}

impl DelimitedFormat {
    pub fn new(separator: &str, quoting: Quoting) -> Result<Self> {
        let format = Self {
            separator: separator.to_string(),
            quoting,
        };
        format.validate()?;
        Ok(format)
    }

    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(PlutusError::ConfigError(
                "separator must not be empty".to_string(),
            ));
        }
        if self.quoting == Quoting::Necessary && self.quote_byte().is_none() {
            return Err(PlutusError::ConfigError(format!(
                "quoting needs a single ASCII separator, got {:?}",
                self.separator
            )));
        }
        Ok(())
    }

    fn quote_byte(&self) -> Option<u8> {
        match self.separator.as_bytes() {
            [b] if b.is_ascii() && *b != b'"' && *b != b'\n' => Some(*b),
            _ => None,
        }
    }

    /// Join cells with the separator and rows with `\n`, no trailing newline
    pub fn render(&self, rows: &[Vec<String>]) -> Result<String> {
        match self.quoting {
            Quoting::Never => Ok(rows
                .iter()
                .map(|row| row.join(&self.separator))
                .collect::<Vec<_>>()
                .join("\n")),
            Quoting::Necessary => self.render_quoted(rows),
        }
    }

    fn render_quoted(&self, rows: &[Vec<String>]) -> Result<String> {
        let delimiter = self.quote_byte().ok_or_else(|| {
            PlutusError::ConfigError(format!(
                "quoting needs a single ASCII separator, got {:?}",
                self.separator
            ))
        })?;

        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        for row in rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| PlutusError::Other(format!("Failed to flush table: {}", e)))?;
        let mut text = String::from_utf8(bytes)
            .map_err(|e| PlutusError::Other(format!("Table is not valid UTF-8: {}", e)))?;
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }
}
