use shared::domain::CompoundSort;

use super::*;

fn advisory_layout() -> ColumnLayout {
    let mut compound = CompoundSortMap::new();
    compound.insert(
        "applicable_advisories".to_string(),
        CompoundSort {
            asc: "rhsa_count,rhba_count,rhea_count".to_string(),
            desc: "-rhsa_count,-rhba_count,-rhea_count".to_string(),
        },
    );
    compound.insert(
        "status".to_string(),
        CompoundSort {
            asc: "stale,last_upload".to_string(),
            desc: "-stale,-last_upload".to_string(),
        },
    );

    ColumnLayout::new(vec![
        Column::new("display_name", "Name"),
        Column::new("applicable_advisories", "Applicable advisories"),
        Column::new("status", "Status"),
        Column::new("os", "OS"),
        Column::new("last_upload", "Last seen"),
    ])
    .with_leading_columns(1)
    .with_compound_sort(compound)
}

#[test]
fn sort_round_trips_for_every_column_and_direction() {
    let layout = advisory_layout();
    for index in 1..=layout.columns.len() {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let change = layout.on_sort(index, direction).expect("sort");
            let sort_by = layout
                .sort_by_from_metadata(change.sort.as_deref())
                .expect("indicator")
                .expect("some indicator");
            assert_eq!(sort_by, SortBy { index, direction }, "column {index}");
        }
    }
}

#[test]
fn plain_column_gets_minus_prefix_when_descending() {
    let layout = advisory_layout();
    assert_eq!(
        layout.sort_param(1, SortDirection::Desc).expect("sort"),
        "-display_name"
    );
    assert_eq!(
        layout.sort_param(4, SortDirection::Asc).expect("sort"),
        "os"
    );
}

#[test]
fn compound_column_uses_direction_specific_token() {
    let layout = advisory_layout();
    let change = layout.on_sort(2, SortDirection::Desc).expect("sort");
    assert_eq!(
        change.sort.as_deref(),
        Some("-rhsa_count,-rhba_count,-rhea_count")
    );
    assert!(change.offset.is_none());
}

#[test]
fn leading_column_index_is_a_configuration_error() {
    let err = advisory_layout()
        .sort_param(0, SortDirection::Asc)
        .expect_err("checkbox column");
    assert!(matches!(err, TableError::Configuration(_)));
}

#[test]
fn out_of_range_index_is_a_configuration_error() {
    let err = advisory_layout()
        .sort_param(9, SortDirection::Asc)
        .expect_err("out of range");
    assert!(matches!(err, TableError::Configuration(_)));
}

#[test]
fn unsortable_column_is_rejected() {
    let layout = ColumnLayout::new(vec![
        Column::new("name", "Name"),
        Column::new("tags", "Tags").unsortable(),
    ]);
    assert!(layout.sort_param(1, SortDirection::Asc).is_err());
}

#[test]
fn unknown_sort_key_is_a_configuration_error() {
    let err = advisory_layout()
        .sort_by_from_metadata(Some("-kernel_version"))
        .expect_err("unknown key");
    assert!(matches!(err, TableError::Configuration(_)));
}

#[test]
fn missing_sort_yields_no_indicator() {
    let layout = advisory_layout();
    assert_eq!(layout.sort_by_from_metadata(None).expect("none"), None);
    assert_eq!(layout.sort_by_from_metadata(Some("")).expect("none"), None);
}

#[test]
fn indicator_without_leading_columns_uses_plain_position() {
    let layout = ColumnLayout::new(vec![
        Column::new("name", "Name"),
        Column::new("last_upload", "Last seen"),
    ]);
    assert_eq!(
        layout
            .sort_by_from_metadata(Some("-last_upload"))
            .expect("indicator"),
        Some(SortBy {
            index: 1,
            direction: SortDirection::Desc
        })
    );
}

#[test]
fn sort_by_column_key_uses_compound_tokens() {
    let layout = advisory_layout();
    assert_eq!(
        layout
            .sort_param_by_key("applicable_advisories", SortDirection::Asc)
            .expect("sort"),
        "rhsa_count,rhba_count,rhea_count"
    );
    assert_eq!(
        layout
            .sort_param_by_key("last_upload", SortDirection::Desc)
            .expect("sort"),
        "-last_upload"
    );
    assert!(matches!(
        layout.sort_param_by_key("groups", SortDirection::Asc),
        Err(TableError::Configuration(_))
    ));
}
