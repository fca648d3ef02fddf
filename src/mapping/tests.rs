//! Tests for the mapping rules

use super::*;
use crate::source::FieldType;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn is_host_legal(id: &str) -> bool {
    id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ============================================================================
// Sanitizer
// ============================================================================

#[test_case("Name", "Name" ; "plain")]
#[test_case("Due Date", "Due_Date" ; "space")]
#[test_case("a\"b", "a_doublequote_b" ; "double quote")]
#[test_case("a,b", "a_comma_b" ; "comma")]
#[test_case("a=b", "a_equal_b" ; "equals")]
#[test_case("a/b", "a_fslash_b" ; "slash")]
#[test_case("a-b", "a_dash_b" ; "dash")]
#[test_case("v1.2", "v1_dot_2" ; "dot")]
#[test_case("Cost ($)", "Cost____" ; "catch all")]
#[test_case("Café", "Caf_" ; "non ascii")]
#[test_case("a🎉b", "a_b" ; "astral char is one underscore")]
#[test_case("", "" ; "empty")]
fn test_sanitize_id(input: &str, expected: &str) {
    assert_eq!(sanitize_id(input), expected);
}

#[test_case("Due Date")]
#[test_case("Price/Unit - USD.")]
#[test_case("\"quoted\", a=b")]
#[test_case("日本語 ✓ emoji 🎉")]
#[test_case("_airtableRecordId")]
#[test_case("tab\tand\nnewline")]
fn test_sanitize_id_is_idempotent_and_legal(input: &str) {
    let once = sanitize_id(input);
    assert!(is_host_legal(&once), "illegal id: {once}");
    assert_eq!(sanitize_id(&once), once);
}

// ============================================================================
// Type mapper
// ============================================================================

#[test_case("checkbox", HostDataType::Bool)]
#[test_case("createdTime", HostDataType::Datetime)]
#[test_case("lastModifiedTime", HostDataType::Datetime)]
#[test_case("dateTime", HostDataType::Datetime)]
#[test_case("date", HostDataType::Date)]
#[test_case("number", HostDataType::Float)]
#[test_case("currency", HostDataType::Float)]
#[test_case("percent", HostDataType::Float)]
#[test_case("count", HostDataType::Int)]
#[test_case("rating", HostDataType::Int)]
#[test_case("duration", HostDataType::Int)]
#[test_case("singleLineText", HostDataType::String)]
#[test_case("singleCollaborator", HostDataType::String)]
#[test_case("formula", HostDataType::String)]
#[test_case("somethingNew", HostDataType::String)]
fn test_map_field_type(field_type: &str, expected: HostDataType) {
    assert_eq!(map_field_type(&FieldType::from(field_type)), expected);
}

#[test]
fn test_column_role() {
    assert_eq!(column_role(HostDataType::Int), ColumnRole::Measure);
    assert_eq!(column_role(HostDataType::Float), ColumnRole::Measure);
    assert_eq!(column_role(HostDataType::String), ColumnRole::Dimension);
    assert_eq!(column_role(HostDataType::Bool), ColumnRole::Dimension);
    assert_eq!(column_role(HostDataType::Datetime), ColumnRole::Dimension);
}

#[test]
fn test_excluded_types() {
    assert!(is_excluded(&FieldType::Button));
    assert!(is_excluded(&FieldType::MultipleAttachments));
    assert!(!is_excluded(&FieldType::Checkbox));
    assert!(!is_excluded(&FieldType::Other("button2".to_string())));
}

#[test]
fn test_host_data_type_serializes_lowercase() {
    assert_eq!(serde_json::to_value(HostDataType::Datetime).unwrap(), json!("datetime"));
    assert_eq!(serde_json::to_value(ColumnRole::Measure).unwrap(), json!("measure"));
}

// ============================================================================
// Coercion
// ============================================================================

#[test_case("checkbox")]
#[test_case("singleCollaborator")]
#[test_case("multipleCollaborators")]
#[test_case("number")]
#[test_case("unknownType")]
fn test_missing_value_stays_missing(field_type: &str) {
    let ft = FieldType::from(field_type);
    assert_eq!(coerce_value(None, &ft).unwrap(), None);
    assert_eq!(coerce_value(Some(&json!(null)), &ft).unwrap(), None);
}

#[test]
fn test_checkbox_is_strict() {
    let ft = FieldType::Checkbox;
    assert_eq!(coerce_value(Some(&json!(true)), &ft).unwrap(), Some(CellValue::Bool(true)));
    assert_eq!(coerce_value(Some(&json!(1)), &ft).unwrap(), Some(CellValue::Bool(false)));
    assert_eq!(coerce_value(Some(&json!("true")), &ft).unwrap(), Some(CellValue::Bool(false)));
    assert_eq!(coerce_value(Some(&json!(false)), &ft).unwrap(), Some(CellValue::Bool(false)));
}

#[test_case("singleCollaborator")]
#[test_case("createdBy")]
#[test_case("lastModifiedBy")]
fn test_collaborator_projects_email(field_type: &str) {
    let raw = json!({"id": "usr1", "email": "a@x.com", "name": "Ada"});
    let cell = coerce_value(Some(&raw), &FieldType::from(field_type)).unwrap();
    assert_eq!(cell, Some(CellValue::from("a@x.com")));
}

#[test]
fn test_collaborator_without_email_is_missing() {
    let raw = json!({"id": "usr1", "name": "Ada"});
    assert_eq!(coerce_value(Some(&raw), &FieldType::SingleCollaborator).unwrap(), None);
}

#[test]
fn test_multiple_collaborators_joined() {
    let raw = json!([{"email": "a@x.com"}, {"name": "no email"}, {"email": "b@x.com"}]);
    let cell = coerce_value(Some(&raw), &FieldType::MultipleCollaborators).unwrap();
    assert_eq!(cell, Some(CellValue::from("a@x.com,,b@x.com")));
}

#[test]
fn test_multiple_collaborators_rejects_non_list() {
    let raw = json!({"email": "a@x.com"});
    let err = coerce_value(Some(&raw), &FieldType::MultipleCollaborators).unwrap_err();
    assert!(matches!(err, crate::Error::Coercion { .. }));
}

#[test_case(json!("Buy milk"), "Buy milk" ; "string")]
#[test_case(json!(42), "42" ; "integer")]
#[test_case(json!(3.5), "3.5" ; "float")]
#[test_case(json!(true), "true" ; "bool")]
#[test_case(json!(["High", "Urgent"]), "High,Urgent" ; "array")]
#[test_case(json!(["recA", 1, null]), "recA,1," ; "mixed array")]
#[test_case(json!({"specialValue": "NaN"}), r#"{"specialValue":"NaN"}"# ; "object")]
fn test_default_text_conversion(raw: serde_json::Value, expected: &str) {
    let cell = coerce_value(Some(&raw), &FieldType::Other("formula".to_string())).unwrap();
    assert_eq!(cell, Some(CellValue::from(expected)));
}

#[test]
fn test_numeric_fields_are_stringified() {
    let cell = coerce_value(Some(&json!(9.99)), &FieldType::Currency).unwrap();
    assert_eq!(cell, Some(CellValue::from("9.99")));
}

#[test]
fn test_cell_value_serializes_untagged() {
    assert_eq!(serde_json::to_value(CellValue::Bool(true)).unwrap(), json!(true));
    assert_eq!(serde_json::to_value(CellValue::from("x")).unwrap(), json!("x"));
}
