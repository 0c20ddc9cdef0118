use crate::error::Result;

/// Destination for a finished export
pub trait OutputSink: Send + Sync {
    /// Save `content` under `filename` and return a description of where it went
    fn save(&self, filename: &str, content: &str, mime: &str) -> Result<String>;
}
