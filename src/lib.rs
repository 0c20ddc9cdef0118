pub mod api;
pub mod cli;
pub mod config;
pub mod credential;
pub mod error;
pub mod export;
pub mod orchestrator;
pub mod output;
pub mod ui;

pub use error::{PlutusError, Result};
