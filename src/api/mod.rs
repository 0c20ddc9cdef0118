pub mod client;
pub mod models;
pub mod plutus;
pub mod response;

pub use client::{DecodeAs, Decoded, Method, PlutusClient};
pub use models::{Record, StatementFilter, StatementsEnvelope, StatementsQuery};
pub use plutus::{Endpoints, DEFAULT_GRAPHQL_ENDPOINT, DEFAULT_REWARDS_ENDPOINT};
