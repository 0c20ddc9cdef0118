use super::defaults::{default_output_dir, default_separator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub quote: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            quote: false,
            output_dir: default_output_dir(),
        }
    }
}
