//! Tests for the schema handler

use super::*;
use crate::mapping::{ColumnRole, HostDataType};
use crate::source::{FieldMeta, MemorySource, TableMeta};
use crate::state::ConnectionState;
use pretty_assertions::assert_eq;
use serde_json::json;

const BASE: &str = "appAbc12345";

fn table(id: &str, name: &str, fields: Vec<FieldMeta>) -> TableMeta {
    TableMeta {
        id: id.to_string(),
        name: name.to_string(),
        primary_field_id: None,
        description: None,
        fields,
    }
}

fn tasks() -> TableMeta {
    table(
        "tblTasks",
        "Tasks",
        vec![
            FieldMeta::new("Name", "singleLineText"),
            FieldMeta::new("Done", "checkbox"),
            FieldMeta::new("Owner", "singleCollaborator"),
        ],
    )
}

fn state() -> ConnectionState {
    ConnectionState::new(BASE).unwrap()
}

#[tokio::test]
async fn test_tasks_schema() {
    let source = MemorySource::new().with_table(BASE, tasks());

    let description = describe_schema(&source, &state()).await.unwrap();
    assert_eq!(source.request_count(), 1);
    assert_eq!(description.tables.len(), 1);

    let table = &description.tables[0];
    assert_eq!(table.id, "Tasks");
    assert_eq!(table.alias, "Tasks");
    assert_eq!(
        table.description.as_deref(),
        Some("Airtable 'Tasks' (tblTasks) from base appAbc12345.")
    );
    assert_eq!(
        table.column_ids().collect::<Vec<_>>(),
        vec!["Name", "Done", "Owner", "_airtableRecordId"]
    );

    let done = table.column("Done").unwrap();
    assert_eq!(done.data_type, HostDataType::Bool);
    assert_eq!(done.column_role, ColumnRole::Dimension);
    assert_eq!(done.alias.as_deref(), Some("Done"));
    assert_eq!(done.description.as_deref(), Some("Done"));

    let record_id = table.column("_airtableRecordId").unwrap();
    assert_eq!(record_id.data_type, HostDataType::String);
    assert!(record_id.alias.is_none());
    assert_eq!(
        record_id.description.as_deref(),
        Some("Airtable Record ID from table Tasks")
    );
}

#[tokio::test]
async fn test_field_names_are_sanitized_but_kept_as_alias() {
    let source = MemorySource::new().with_table(
        BASE,
        table(
            "tblDue",
            "Due Items",
            vec![FieldMeta::new("Due Date", "date"), FieldMeta::new("Cost-USD", "currency")],
        ),
    );

    let description = describe_schema(&source, &state()).await.unwrap();
    let table = &description.tables[0];

    assert_eq!(table.id, "Due_Items");
    assert_eq!(table.alias, "Due Items");

    let due = table.column("Due_Date").unwrap();
    assert_eq!(due.alias.as_deref(), Some("Due Date"));
    assert_eq!(due.description.as_deref(), Some("Due Date"));
    assert_eq!(due.data_type, HostDataType::Date);

    let cost = table.column("Cost_dash_USD").unwrap();
    assert_eq!(cost.data_type, HostDataType::Float);
    assert_eq!(cost.column_role, ColumnRole::Measure);
}

#[tokio::test]
async fn test_excluded_fields_are_absent() {
    let source = MemorySource::new().with_table(
        BASE,
        table(
            "tblFiles",
            "Files",
            vec![
                FieldMeta::new("Name", "singleLineText"),
                FieldMeta::new("Attachments", "multipleAttachments"),
                FieldMeta::new("Open", "button"),
                FieldMeta::new("Votes", "count"),
            ],
        ),
    );

    let description = describe_schema(&source, &state()).await.unwrap();
    let table = &description.tables[0];

    assert_eq!(
        table.column_ids().collect::<Vec<_>>(),
        vec!["Name", "Votes", "_airtableRecordId"]
    );
    assert!(description.field_metadata.field("Files", "Attachments").is_none());
    assert!(description.field_metadata.field("Files", "Open").is_none());
    assert_eq!(
        description.field_metadata.field("Files", "Votes").unwrap().field_type,
        crate::source::FieldType::Count
    );
}

#[tokio::test]
async fn test_field_metadata_covers_every_table() {
    let source = MemorySource::new()
        .with_table(BASE, tasks())
        .with_table(BASE, table("tblEmpty", "Empty", vec![]));

    let description = describe_schema(&source, &state()).await.unwrap();

    assert_eq!(description.tables.len(), 2);
    assert_eq!(
        description.field_metadata.table("Tasks").unwrap().len(),
        3
    );
    assert!(description.field_metadata.table("Empty").unwrap().is_empty());

    // An empty table still exposes the record-ID column
    assert_eq!(
        description.tables[1].column_ids().collect::<Vec<_>>(),
        vec!["_airtableRecordId"]
    );
}

#[tokio::test]
async fn test_custom_record_id_column() {
    let source = MemorySource::new().with_table(BASE, tasks());
    let state = state().with_record_id_field("Airtable ID").unwrap();

    let description = describe_schema(&source, &state).await.unwrap();
    assert!(description.tables[0].column("Airtable_ID").is_some());
}

#[tokio::test]
async fn test_unknown_base_aborts() {
    let source = MemorySource::new().with_table(BASE, tasks());
    let state = ConnectionState::new("appOther1234").unwrap();

    let err = describe_schema(&source, &state).await.unwrap_err();
    assert!(err.is_access_error());
}

#[test]
fn test_descriptor_serializes_host_shape() {
    let state = state();
    let tasks = tasks();
    let fields: Vec<&FieldMeta> = tasks.fields.iter().take(1).collect();
    let descriptor = describe_table(&tasks, &fields, &state);

    assert_eq!(
        serde_json::to_value(&descriptor).unwrap(),
        json!({
            "id": "Tasks",
            "alias": "Tasks",
            "description": "Airtable 'Tasks' (tblTasks) from base appAbc12345.",
            "columns": [
                {
                    "id": "Name",
                    "alias": "Name",
                    "description": "Name",
                    "columnRole": "dimension",
                    "dataType": "string"
                },
                {
                    "id": "_airtableRecordId",
                    "description": "Airtable Record ID from table Tasks",
                    "columnRole": "dimension",
                    "dataType": "string"
                }
            ]
        })
    );
}
