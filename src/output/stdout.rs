use super::sink::OutputSink;
use crate::error::{PlutusError, Result};
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes exports to a stream, by default stdout.
///
/// With labels enabled every table is preceded by a `==> filename <==` line,
/// the way `head` separates several files.
pub struct StreamSink<W: Write + Send> {
    writer: Mutex<W>,
    labels: bool,
}

pub type StdoutSink = StreamSink<io::Stdout>;

impl StreamSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            labels: false,
        }
    }

    pub fn with_labels(mut self, enabled: bool) -> Self {
        self.labels = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> OutputSink for StreamSink<W> {
    fn save(&self, filename: &str, content: &str, _mime: &str) -> Result<String> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| PlutusError::Other("output stream lock poisoned".to_string()))?;
        if self.labels {
            writeln!(writer, "==> {} <==", filename)?;
        }
        writer.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok("stdout".to_string())
    }
}
