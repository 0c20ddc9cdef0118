use super::client::{DecodeAs, PlutusClient};
use super::models::{Record, StatementFilter, StatementsEnvelope, StatementsQuery};
use super::response::{records_from_array, statements_from_envelope};
use crate::error::Result;
use crate::ui::trace;

pub const DEFAULT_REWARDS_ENDPOINT: &str = "https://api.plutus.it/platform/transactions/pluton";
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://hasura.plutus.it/v1alpha1/graphql";

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub rewards: String,
    pub graphql: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            rewards: DEFAULT_REWARDS_ENDPOINT.to_string(),
            graphql: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
        }
    }
}

impl PlutusClient {
    /// All reward (pluton) transactions of the account
    pub async fn fetch_rewards(&self) -> Result<Vec<Record>> {
        let url = self.endpoints().rewards.clone();
        let body = self.get(&url, DecodeAs::Json).await?.into_json().await?;
        let rewards = records_from_array(body)?;
        trace(
            self.is_verbose(),
            &format!("Fetched {} rewards", rewards.len()),
        );
        Ok(rewards)
    }

    /// Card statement transactions, as a single unbounded page
    pub async fn fetch_statements(&self, filter: &StatementFilter) -> Result<StatementsEnvelope> {
        let url = self.endpoints().graphql.clone();
        let payload = StatementsQuery::new(filter).to_body()?;
        let body = self
            .post(&url, &payload, DecodeAs::Json)
            .await?
            .into_json()
            .await?;
        let envelope = statements_from_envelope(body)?;
        if let Some(total) = envelope.total_count() {
            trace(
                self.is_verbose(),
                &format!(
                    "Fetched {} of {} statements",
                    envelope.data.transactions_view.len(),
                    total
                ),
            );
        }
        Ok(envelope)
    }
}
