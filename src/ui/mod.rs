mod output;

pub use output::{display_error, display_saved, trace, warn};
