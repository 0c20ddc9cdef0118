use crate::export::DEFAULT_SEPARATOR;

pub fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

pub fn default_output_dir() -> String {
    ".".to_string()
}

pub fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}
