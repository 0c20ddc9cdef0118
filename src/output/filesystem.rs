use super::sink::OutputSink;
use crate::error::Result;
use std::fs;
use std::path::PathBuf;

/// Writes exports into a directory, replacing files of the same name
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for DirectorySink {
    fn default() -> Self {
        Self::new(".")
    }
}

impl OutputSink for DirectorySink {
    fn save(&self, filename: &str, content: &str, _mime: &str) -> Result<String> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        let path = self.dir.join(filename);
        fs::write(&path, content)?;
        Ok(path.display().to_string())
    }
}
