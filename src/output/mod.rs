mod filesystem;
mod sink;
mod stdout;

pub use filesystem::DirectorySink;
pub use sink::OutputSink;
pub use stdout::{StdoutSink, StreamSink};

pub const CSV_MIME: &str = "text/csv";
