mod common;

use common::{client_for, RecordingSink, GRAPHQL_PATH, REWARDS_PATH};
use plutus_export::api::StatementFilter;
use plutus_export::export::{
    convert_rewards, rewards_table, statements_table, DelimitedFormat, Exporter, Quoting,
    CHAINREPORT_FILENAME, REWARDS_FILENAME, STATEMENTS_FILENAME,
};
use plutus_export::PlutusError;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reward_fixture() -> Value {
    json!([
        {
            "id": "r1",
            "createdAt": "2023-01-01T12:00:00.000Z",
            "type": "DAILY_REBATE_DISTRIBUTION",
            "reward_plu_value": "10.50",
            "description": "Coffee, large",
            "statement_id": "s1",
            "fiat_transaction": {"amount": 350, "currency": "EUR"},
            "contis_transaction": null
        },
        {
            "id": "r2",
            "createdAt": "2023-01-02T08:30:00.000Z",
            "type": "REBATE_BONUS",
            "reward_plu_value": "2.00",
            "description": null,
            "statement_id": "s2",
            "fiat_transaction": null,
            "contis_transaction": {"id": 9}
        }
    ])
}

fn statements_fixture() -> Value {
    json!({
        "data": {
            "transactions_view_aggregate": {
                "aggregate": {"totalCount": 2, "__typename": "transactions_view_aggregate_fields"},
                "__typename": "transactions_view_aggregate"
            },
            "transactions_view": [
                {
                    "id": "t1",
                    "amount": -350,
                    "date": "2023-01-01T11:59:00+00:00",
                    "is_debit": true,
                    "description": "COFFEE SHOP",
                    "mcc": null,
                    "fiat_transaction": "kept"
                },
                {
                    "id": "t2",
                    "amount": 1000,
                    "date": "2023-01-03T09:00:00+00:00",
                    "is_debit": false,
                    "description": "TOP UP"
                }
            ]
        }
    })
}

async fn mount_rewards(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(REWARDS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_statements(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_export_rewards() {
    let server = MockServer::start().await;
    mount_rewards(&server, reward_fixture()).await;
    let client = client_for(&server);
    let sink = RecordingSink::default();

    let summary = Exporter::new(&client, &sink, DelimitedFormat::default())
        .export_rewards()
        .await
        .unwrap();

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.destination, "memory:plutus-rewards.csv");

    let saved = sink.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].filename, REWARDS_FILENAME);
    assert_eq!(saved[0].mime, "text/csv");
    assert_eq!(
        saved[0].content,
        "id|createdAt|type|reward_plu_value|description|statement_id\n\
         r1|2023-01-01T12:00:00.000Z|DAILY_REBATE_DISTRIBUTION|10.50|Coffee, large|s1\n\
         r2|2023-01-02T08:30:00.000Z|REBATE_BONUS|2.00||s2"
    );
}

#[tokio::test]
async fn test_export_rewards_empty_never_saves() {
    let server = MockServer::start().await;
    mount_rewards(&server, json!([])).await;
    let client = client_for(&server);
    let sink = RecordingSink::default();

    let result = Exporter::new(&client, &sink, DelimitedFormat::default())
        .export_rewards()
        .await;

    assert!(matches!(result, Err(PlutusError::EmptyResult { ref dataset }) if dataset == "rewards"));
    assert!(sink.saved().is_empty());
}

#[tokio::test]
async fn test_export_rewards_rejects_non_array() {
    let server = MockServer::start().await;
    mount_rewards(&server, json!({"message": "Unauthorized"})).await;
    let client = client_for(&server);
    let sink = RecordingSink::default();

    let result = Exporter::new(&client, &sink, DelimitedFormat::default())
        .export_rewards()
        .await;

    assert!(matches!(result, Err(PlutusError::DecodeError(_))));
    assert!(sink.saved().is_empty());
}

#[tokio::test]
async fn test_export_statements() {
    let server = MockServer::start().await;
    mount_statements(&server, statements_fixture()).await;
    let client = client_for(&server);
    let sink = RecordingSink::default();

    let summary = Exporter::new(&client, &sink, DelimitedFormat::default())
        .export_statements(&StatementFilter::default())
        .await
        .unwrap();
    assert_eq!(summary.rows, 2);

    let saved = sink.saved();
    assert_eq!(saved[0].filename, STATEMENTS_FILENAME);
    assert_eq!(
        saved[0].content,
        "id|amount|date|is_debit|description|mcc|fiat_transaction\n\
         t1|-350|2023-01-01T11:59:00+00:00|true|COFFEE SHOP||kept\n\
         t2|1000|2023-01-03T09:00:00+00:00|false|TOP UP||"
    );

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["operationName"], "transactions_view");
    assert_eq!(sent["variables"], json!({"offset": 0, "limit": null}));
    assert!(sent["query"].as_str().unwrap().contains("transactions_view("));
}

#[tokio::test]
async fn test_export_statements_sends_filter() {
    let server = MockServer::start().await;
    mount_statements(&server, statements_fixture()).await;
    let client = client_for(&server);
    let sink = RecordingSink::default();

    let filter = StatementFilter {
        from: chrono::NaiveDate::from_ymd_opt(2023, 1, 1),
        to: None,
        transaction_type: Some("PURCHASE".to_string()),
    };
    Exporter::new(&client, &sink, DelimitedFormat::default())
        .export_statements(&filter)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent["variables"],
        json!({"offset": 0, "limit": null, "from": "2023-01-01T00:00:00Z", "type": "PURCHASE"})
    );
}

#[tokio::test]
async fn test_export_statements_empty() {
    let server = MockServer::start().await;
    mount_statements(&server, json!({"data": {"transactions_view": []}})).await;
    let client = client_for(&server);
    let sink = RecordingSink::default();

    let result = Exporter::new(&client, &sink, DelimitedFormat::default())
        .export_statements(&StatementFilter::default())
        .await;

    assert!(matches!(result, Err(PlutusError::EmptyResult { ref dataset }) if dataset == "statements"));
    assert!(sink.saved().is_empty());
}

#[tokio::test]
async fn test_export_statements_graphql_error() {
    let server = MockServer::start().await;
    mount_statements(
        &server,
        json!({"errors": [{"message": "Could not verify JWT: JWTExpired"}]}),
    )
    .await;
    let client = client_for(&server);
    let sink = RecordingSink::default();

    let result = Exporter::new(&client, &sink, DelimitedFormat::default())
        .export_statements(&StatementFilter::default())
        .await;

    match result {
        Err(PlutusError::DecodeError(message)) => assert!(message.contains("JWTExpired")),
        other => panic!("unexpected result: {:?}", other.map(|s| s.rows)),
    }
}

#[tokio::test]
async fn test_export_with_quoting() {
    let server = MockServer::start().await;
    mount_rewards(
        &server,
        json!([{"id": "r1", "description": "Bar | Grill"}]),
    )
    .await;
    let client = client_for(&server);
    let sink = RecordingSink::default();
    let format = DelimitedFormat::new("|", Quoting::Necessary).unwrap();

    Exporter::new(&client, &sink, format)
        .export_rewards()
        .await
        .unwrap();

    assert_eq!(sink.saved()[0].content, "id|description\nr1|\"Bar | Grill\"");
}

#[tokio::test]
async fn test_export_rewards_with_chainreport() {
    let server = MockServer::start().await;
    mount_rewards(&server, reward_fixture()).await;
    let client = client_for(&server);
    let sink = RecordingSink::default();

    let summaries = Exporter::new(&client, &sink, DelimitedFormat::default())
        .export_rewards_with_chainreport()
        .await
        .unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[1].rows, 2);
    assert_eq!(summaries[1].destination, "memory:plutus-rewards-chainreport.csv");

    let saved = sink.saved();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].filename, REWARDS_FILENAME);
    assert_eq!(saved[1].filename, CHAINREPORT_FILENAME);
    assert_eq!(saved[1].mime, "text/csv");
    assert_eq!(
        saved[1].content,
        "Zeitpunkt;Transaktions Typ;Anzahl Eingang;Währung Eingang;Anzahl Ausgang;\
         Währung Ausgang;Transaktionsgebühr;Währung Transaktionsgebühr;\
         Oder-ID der Exchange;Beschreibung\r\n\
         01.01.2023 12:00;Cashback;10,50;PLU;;;;;s1;Coffee, large\r\n\
         02.01.2023 08:30;Cashback;2,00;PLU;;;;;s2;\r\n"
    );

    // a single fetch feeds both files
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_chainreport_failure_saves_nothing() {
    let server = MockServer::start().await;
    let mut rewards = reward_fixture();
    rewards[1]
        .as_object_mut()
        .unwrap()
        .insert("createdAt".to_string(), json!("yesterday"));
    mount_rewards(&server, rewards).await;
    let client = client_for(&server);
    let sink = RecordingSink::default();

    let result = Exporter::new(&client, &sink, DelimitedFormat::default())
        .export_rewards_with_chainreport()
        .await;

    assert!(matches!(result, Err(PlutusError::DecodeError(_))));
    assert!(sink.saved().is_empty());
}

#[test]
fn test_chainreport_skips_blank_type_and_flags_unknown() {
    let mut records: Vec<_> = reward_fixture()
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_object().unwrap().clone())
        .collect();
    records[0].insert("type".to_string(), json!(""));
    records[1].insert("type".to_string(), json!("AIRDROP"));

    let report = convert_rewards(&records).unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.unknown, 1);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0][0], "02.01.2023 08:30");
    assert_eq!(report.rows[0][1], "ERROR");
}

#[test]
fn test_excluded_fields_only_apply_to_rewards() {
    let records: Vec<_> = reward_fixture()
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_object().unwrap().clone())
        .collect();

    let rewards = rewards_table(&records).unwrap();
    assert!(!rewards.columns().iter().any(|c| c == "fiat_transaction"));
    assert!(!rewards.columns().iter().any(|c| c == "contis_transaction"));

    let statements = statements_table(&records).unwrap();
    assert!(statements.columns().iter().any(|c| c == "fiat_transaction"));
    assert!(statements.columns().iter().any(|c| c == "contis_transaction"));
    assert_eq!(statements.rows()[0][6], "{\"amount\":350,\"currency\":\"EUR\"}");
    assert_eq!(statements.rows()[0][7], "");
}

#[test]
fn test_statement_null_and_absent_render_empty() {
    let records: Vec<_> = json!([{"a": 1, "b": null}, {"a": 2}])
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_object().unwrap().clone())
        .collect();

    let table = statements_table(&records).unwrap();
    assert_eq!(table.to_rows(), vec![vec!["a", "b"], vec!["1", ""], vec!["2", ""]]);
}

#[test]
fn test_reward_missing_field_is_error() {
    let records: Vec<_> = json!([{"a": 1, "b": 2}, {"a": 2}])
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_object().unwrap().clone())
        .collect();

    assert!(matches!(
        rewards_table(&records),
        Err(PlutusError::MissingField { row: 1, .. })
    ));
}
