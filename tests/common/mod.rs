#![allow(dead_code)]

use plutus_export::api::{Endpoints, PlutusClient};
use plutus_export::credential::StaticCredential;
use plutus_export::output::OutputSink;
use plutus_export::Result;
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

pub const TOKEN: &str = "test-id-token";
pub const REWARDS_PATH: &str = "/platform/transactions/pluton";
pub const GRAPHQL_PATH: &str = "/v1alpha1/graphql";

pub fn endpoints_for(server: &MockServer) -> Endpoints {
    Endpoints {
        rewards: format!("{}{}", server.uri(), REWARDS_PATH),
        graphql: format!("{}{}", server.uri(), GRAPHQL_PATH),
    }
}

pub fn client_for(server: &MockServer) -> PlutusClient {
    PlutusClient::new(Arc::new(StaticCredential::new(TOKEN)), endpoints_for(server))
        .expect("Failed to build client")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub filename: String,
    pub content: String,
    pub mime: String,
}

/// Sink that keeps every save in memory
#[derive(Default)]
pub struct RecordingSink {
    saved: Mutex<Vec<Saved>>,
}

impl RecordingSink {
    pub fn saved(&self) -> Vec<Saved> {
        self.saved.lock().unwrap().clone()
    }
}

impl OutputSink for RecordingSink {
    fn save(&self, filename: &str, content: &str, mime: &str) -> Result<String> {
        self.saved.lock().unwrap().push(Saved {
            filename: filename.to_string(),
            content: content.to_string(),
            mime: mime.to_string(),
        });
        Ok(format!("memory:{}", filename))
    }
}
