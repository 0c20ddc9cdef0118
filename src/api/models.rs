use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of API data, keys kept in the order the server sent them
pub type Record = Map<String, Value>;

pub const STATEMENTS_OPERATION: &str = "transactions_view";

pub const STATEMENTS_QUERY: &str = r#"query transactions_view($offset: Int, $limit: Int, $from: timestamptz, $to: timestamptz, $type: String) {
  transactions_view_aggregate(
    where: {_and: [{date: {_gte: $from}}, {date: {_lte: $to}}]}
  ) {
    aggregate {
      totalCount: count
      __typename
    }
    __typename
  }
  transactions_view(
    order_by: {date: desc}
    limit: $limit
    offset: $offset
    where: {_and: [{date: {_gte: $from}}, {date: {_lte: $to}}, {type: {_eq: $type}}]}
  ) {
    id
    model
    user_id
    currency
    amount
    date
    type
    is_debit
    description
    clean_description
    confidence
    name
    url
    plu_amount
    original_transaction_id
    mcc
    reward_decline_reason
    activity_id
  }
}
"#;

/// Optional narrowing of the statements query
#[derive(Debug, Clone, Default)]
pub struct StatementFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub transaction_type: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct QueryVariables {
    pub offset: u64,
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
}

impl From<&StatementFilter> for QueryVariables {
    fn from(filter: &StatementFilter) -> Self {
        Self {
            offset: 0,
            limit: None,
            from: filter
                .from
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc()),
            to: filter
                .to
                .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
                .map(|dt| dt.and_utc()),
            transaction_type: filter.transaction_type.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct StatementsQuery {
    #[serde(rename = "operationName")]
    pub operation_name: String,
    pub variables: QueryVariables,
    pub query: String,
}

impl StatementsQuery {
    pub fn new(filter: &StatementFilter) -> Self {
        Self {
            operation_name: STATEMENTS_OPERATION.to_string(),
            variables: QueryVariables::from(filter),
            query: STATEMENTS_QUERY.to_string(),
        }
    }

    /// The query as a JSON object, ready to be posted
    pub fn to_body(&self) -> crate::error::Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(crate::error::PlutusError::Other(
                "statements query did not serialize to an object".to_string(),
            )),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AggregateCount {
    #[serde(rename = "totalCount")]
    pub total_count: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TransactionsAggregate {
    pub aggregate: Option<AggregateCount>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TransactionsData {
    pub transactions_view: Vec<Record>,
    #[serde(default)]
    pub transactions_view_aggregate: Option<TransactionsAggregate>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StatementsEnvelope {
    pub data: TransactionsData,
}

impl StatementsEnvelope {
    pub fn total_count(&self) -> Option<u64> {
        self.data
            .transactions_view_aggregate
            .as_ref()
            .and_then(|a| a.aggregate.as_ref())
            .and_then(|a| a.total_count)
    }

    pub fn into_records(self) -> Vec<Record> {
        self.data.transactions_view
    }
}
