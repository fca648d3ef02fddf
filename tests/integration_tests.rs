//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: form submit → schema phase → data phase
//! → Arrow/Parquet output, against a mocked Airtable API.

use airtable_wdc::auth::Credential;
use airtable_wdc::config::SourceConfig;
use airtable_wdc::host::{get_data, get_schema, submit_connection, MemoryHost};
use airtable_wdc::mapping::{CellValue, ColumnRole, HostDataType};
use airtable_wdc::output::{rows_to_record_batch, write_batch_to_parquet};
use airtable_wdc::source::AirtableClient;
use airtable_wdc::state::ConnectionState;
use airtable_wdc::TableDescriptor;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE: &str = "appTasks0001";

fn config_for(server: &MockServer) -> SourceConfig {
    let mut config = SourceConfig::with_api_url(format!("{}/v0", server.uri()));
    config.requests_per_second = 0;
    config
}

async fn mount_tasks_base(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/v0/meta/bases/{BASE}/tables")))
        .and(header("authorization", "Bearer pat.integration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tables": [
                {
                    "id": "tblTasks",
                    "name": "Tasks",
                    "primaryFieldId": "fldName",
                    "fields": [
                        {"id": "fldName", "name": "Name", "type": "singleLineText"},
                        {"id": "fldDone", "name": "Done", "type": "checkbox"},
                        {"id": "fldOwner", "name": "Owner", "type": "singleCollaborator"},
                        {"id": "fldFiles", "name": "Files", "type": "multipleAttachments"},
                        {"id": "fldRun", "name": "Run", "type": "button"}
                    ]
                },
                {
                    "id": "tblDue",
                    "name": "Due Items",
                    "fields": [
                        {"id": "fldDue", "name": "Due Date", "type": "date"},
                        {"id": "fldHours", "name": "Hours", "type": "number"},
                        {"id": "fldPeople", "name": "People", "type": "multipleCollaborators"}
                    ]
                }
            ]
        })))
        .mount(server)
        .await;
}

async fn schema_phase(server: &MockServer) -> (MemoryHost, Vec<TableDescriptor>) {
    let config = config_for(server);
    let mut host = MemoryHost::new(Credential::new("pat.integration"));
    submit_connection(&mut host, BASE, None).unwrap();

    get_schema(&mut host, |c| AirtableClient::new(&config, c.clone())).await;
    assert!(host.errors().is_empty(), "{:?}", host.errors());

    let tables = host.tables().unwrap().to_vec();
    (host, tables)
}

// ============================================================================
// Schema Phase
// ============================================================================

#[tokio::test]
async fn test_tasks_schema() {
    let server = MockServer::start().await;
    mount_tasks_base(&server).await;

    let (host, tables) = schema_phase(&server).await;

    assert_eq!(tables.len(), 2);
    let tasks = &tables[0];
    assert_eq!(tasks.id, "Tasks");
    assert_eq!(
        tasks.description.as_deref(),
        Some("Airtable 'Tasks' (tblTasks) from base appTasks0001.")
    );

    let ids: Vec<&str> = tasks.column_ids().collect();
    assert_eq!(ids, vec!["Name", "Done", "Owner", "_airtableRecordId"]);

    let done = tasks.column("Done").unwrap();
    assert_eq!(done.data_type, HostDataType::Bool);
    assert_eq!(done.column_role, ColumnRole::Dimension);

    // Stored metadata skips excluded fields too
    let state = ConnectionState::from_connection_data(host.connection_data_ref()).unwrap();
    assert!(state.field_metadata.field("Tasks", "Owner").is_some());
    assert!(state.field_metadata.field("Tasks", "Files").is_none());
}

#[tokio::test]
async fn test_names_are_sanitized() {
    let server = MockServer::start().await;
    mount_tasks_base(&server).await;

    let (_, tables) = schema_phase(&server).await;

    let due = &tables[1];
    assert_eq!(due.id, "Due_Items");
    assert_eq!(due.alias, "Due Items");
    let column = due.column("Due_Date").unwrap();
    assert_eq!(column.alias.as_deref(), Some("Due Date"));
    assert_eq!(column.data_type, HostDataType::Date);
    assert_eq!(due.column("Hours").unwrap().column_role, ColumnRole::Measure);
}

#[tokio::test]
async fn test_no_access_aborts_schema() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v0/meta/bases/{BASE}/tables")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "NOT_FOUND"})),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut host = MemoryHost::new(Credential::new("pat.integration"));
    submit_connection(&mut host, BASE, None).unwrap();
    get_schema(&mut host, |c| AirtableClient::new(&config, c.clone())).await;

    assert_eq!(host.errors().len(), 1);
    let message = &host.errors()[0];
    assert!(message.starts_with("Error during getSchema: Status code 404"));
    assert!(message.contains("Does your account have access to this base?"));
    assert!(host.tables().is_none());
}

#[tokio::test]
async fn test_missing_token_aborts_schema() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    let mut host = MemoryHost::new(Credential::new(""));
    submit_connection(&mut host, BASE, None).unwrap();

    get_schema(&mut host, |c| AirtableClient::new(&config, c.clone())).await;

    assert_eq!(host.errors().len(), 1);
    assert!(host.errors()[0].contains("api_token"));
}

// ============================================================================
// Data Phase
// ============================================================================

#[tokio::test]
async fn test_tasks_rows() {
    let server = MockServer::start().await;
    mount_tasks_base(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/v0/{BASE}/Tasks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{
                "id": "recBuyMilk",
                "createdTime": "2024-01-01T00:00:00.000Z",
                "fields": {
                    "Name": "Buy milk",
                    "Done": true,
                    "Owner": {"id": "usr1", "email": "a@x.com", "name": "A"},
                    "Files": [{"url": "https://example.com/f.png"}]
                }
            }]
        })))
        .mount(&server)
        .await;

    let (mut host, tables) = schema_phase(&server).await;
    let config = config_for(&server);
    get_data(&mut host, &tables[0], |c| AirtableClient::new(&config, c.clone())).await;

    let rows = host.into_rows().unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.len(), 4);
    assert_eq!(row["Name"], Some(CellValue::from("Buy milk")));
    assert_eq!(row["Done"], Some(CellValue::Bool(true)));
    assert_eq!(row["Owner"], Some(CellValue::from("a@x.com")));
    assert_eq!(row["_airtableRecordId"], Some(CellValue::from("recBuyMilk")));
}

#[tokio::test]
async fn test_paged_rows_to_parquet() {
    let server = MockServer::start().await;
    mount_tasks_base(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/v0/{BASE}/Due%20Items")))
        .and(query_param("offset", "itrPage2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{
                "id": "rec2",
                "fields": {"Hours": 1.5, "People": []}
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v0/{BASE}/Due%20Items")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{
                "id": "rec1",
                "fields": {
                    "Due Date": "2024-03-01",
                    "Hours": 2,
                    "People": [{"email": "a@x.com"}, {"email": "b@x.com"}]
                }
            }],
            "offset": "itrPage2"
        })))
        .mount(&server)
        .await;

    let (mut host, tables) = schema_phase(&server).await;
    let config = config_for(&server);
    let due = tables[1].clone();
    get_data(&mut host, &due, |c| AirtableClient::new(&config, c.clone())).await;

    let rows = host.into_rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Due_Date"], Some(CellValue::from("2024-03-01")));
    assert_eq!(rows[0]["People"], Some(CellValue::from("a@x.com,b@x.com")));
    assert_eq!(rows[1]["Due_Date"], None);
    assert_eq!(rows[1]["People"], Some(CellValue::from("")));

    let batch = rows_to_record_batch(&due, &rows).unwrap();
    assert_eq!(batch.num_rows(), 2);

    let dir = tempfile::tempdir().unwrap();
    let written = write_batch_to_parquet(dir.path().join("due.parquet"), &batch, None).unwrap();
    assert_eq!(written, 2);
}

#[tokio::test]
async fn test_fetch_failure_aborts_data() {
    let server = MockServer::start().await;
    mount_tasks_base(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/v0/{BASE}/Tasks")))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;

    let (mut host, tables) = schema_phase(&server).await;
    let config = config_for(&server);
    get_data(&mut host, &tables[0], |c| AirtableClient::new(&config, c.clone())).await;

    assert!(!host.is_done());
    assert_eq!(host.errors().len(), 1);
    assert!(host.errors()[0].starts_with("Error during getData: HTTP 500"));
    assert!(host.errors()[0].contains("upstream down"));
}

#[tokio::test]
async fn test_stuck_offset_aborts_data() {
    let server = MockServer::start().await;
    mount_tasks_base(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/v0/{BASE}/Tasks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"id": "rec1", "fields": {"Name": "Again"}}],
            "offset": "itrSAME"
        })))
        .mount(&server)
        .await;

    let (mut host, tables) = schema_phase(&server).await;
    let config = config_for(&server);
    get_data(&mut host, &tables[0], |c| AirtableClient::new(&config, c.clone())).await;

    assert!(!host.is_done());
    assert!(host.rows().is_empty());
    assert_eq!(host.errors().len(), 1);
    assert!(host.errors()[0].starts_with("Error during getData: Failed to decode records of table 'Tasks' response"));
    assert!(host.errors()[0].contains("itrSAME"));
}
