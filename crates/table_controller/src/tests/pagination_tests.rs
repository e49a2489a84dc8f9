use super::*;

fn metadata(limit: u32, offset: u32) -> Metadata {
    Metadata {
        limit,
        offset,
        total_items: 120,
        ..Metadata::default()
    }
}

#[test]
fn offset_round_trips_through_page_number() {
    for limit in [1, 7, 10, 20, 50, 100] {
        for page_index in 0..25 {
            let offset = page_index * limit;
            let PagePerPage { page, per_page } = page_from_offset(limit, offset).expect("page");
            assert_eq!(per_page, limit);
            assert_eq!(offset_from_page(page, limit).expect("offset"), offset);
        }
    }
}

#[test]
fn offset_inside_a_page_maps_to_that_page() {
    let page = page_from_offset(20, 45).expect("page");
    assert_eq!(page, PagePerPage { page: 3, per_page: 20 });
}

#[test]
fn zero_limit_is_rejected() {
    let err = page_from_offset(0, 40).expect_err("must fail");
    assert!(matches!(err, TableError::Validation { field: "limit", .. }));
}

#[test]
fn page_zero_is_rejected() {
    let err = offset_from_page(0, 20).expect_err("must fail");
    assert!(matches!(err, TableError::Validation { field: "page", .. }));
}

#[test]
fn overflowing_offset_is_rejected() {
    let err = offset_from_page(u32::MAX, 20).expect_err("must fail");
    assert!(matches!(err, TableError::Validation { field: "page", .. }));
}

#[test]
fn set_page_emits_only_offset() {
    let change = set_page(4, 25).expect("change");
    assert_eq!(
        change,
        ParamsChange {
            offset: Some(75),
            ..ParamsChange::default()
        }
    );
}

#[test]
fn per_page_select_resets_to_first_page() {
    let change = per_page_select(50).expect("change");
    assert_eq!(change.limit, Some(50));
    assert_eq!(change.offset, Some(0));
    assert!(change.sort.is_none() && change.filter.is_none() && change.search.is_none());
}

#[test]
fn refresh_with_current_page_emits_nothing() {
    let change = refresh(3, 20, &metadata(20, 40)).expect("change");
    assert!(change.is_empty());
}

#[test]
fn refresh_emits_only_changed_offset() {
    let change = refresh(4, 20, &metadata(20, 40)).expect("change");
    assert_eq!(change.offset, Some(60));
    assert_eq!(change.limit, None);
}

#[test]
fn refresh_emits_only_changed_limit() {
    // page 1 keeps offset 0 regardless of the new page size
    let change = refresh(1, 50, &metadata(20, 0)).expect("change");
    assert_eq!(change.offset, None);
    assert_eq!(change.limit, Some(50));
}

#[test]
fn refresh_rejects_zero_page_size() {
    assert!(refresh(1, 0, &metadata(20, 0)).is_err());
}
