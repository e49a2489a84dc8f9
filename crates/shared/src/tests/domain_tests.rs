use serde_json::json;

use super::*;

#[test]
fn selection_set_wire_form_mixes_flags_and_payloads() {
    let set: SelectionSet = serde_json::from_value(json!({
        "sys-1": true,
        "sys-2": false,
        "sys-3": "kernel-5.14.0-70.el9",
    }))
    .expect("decode selection");

    assert_eq!(set.get("sys-1"), Some(&SelectionValue::SELECTED));
    assert_eq!(
        set.get("sys-3"),
        Some(&SelectionValue::Payload("kernel-5.14.0-70.el9".into()))
    );
    assert_eq!(set.len(), 3);
    assert_eq!(set.selected_count(), 2);
    assert_eq!(set.selected_ids(), vec!["sys-1", "sys-3"]);
}

#[test]
fn empty_payload_is_not_selected() {
    assert!(!SelectionValue::Payload(String::new()).is_selected());
}

#[test]
fn row_decodes_checkbox_flag_and_keeps_other_fields() {
    let row: Row = serde_json::from_value(json!({
        "id": "sys-1",
        "disableCheckbox": true,
        "attributes": { "display_name": "web-1", "installed_evra": "5.14-1" },
        "status": "installable",
    }))
    .expect("decode row");

    assert!(row.disable_checkbox);
    assert_eq!(row.field_str("status"), Some("installable"));
    assert_eq!(row.field_str("display_name"), Some("web-1"));
    assert_eq!(row.field_str("missing"), None);
}

#[test]
fn filter_value_accepts_list_or_scalar() {
    let filters: FilterMap = serde_json::from_value(json!({
        "status": ["installable", "applicable"],
        "os": "RHEL 9",
        "tag": "",
    }))
    .expect("decode filters");

    assert_eq!(filters["status"].values(), vec!["installable", "applicable"]);
    assert_eq!(filters["os"].values(), vec!["RHEL 9"]);
    assert!(filters["tag"].is_empty());
    assert!(filters["tag"].values().is_empty());
}

#[test]
fn query_params_default_to_first_page_of_twenty() {
    let params: QueryParams = serde_json::from_value(json!({ "limit": 20, "offset": 0 }))
        .expect("decode params");
    assert_eq!(params, QueryParams::default());
}
