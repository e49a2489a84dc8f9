//! Active-filter chips: building them from the filter state and turning chip
//! removals back into parameter changes.

use shared::{
    domain::{FilterMap, FilterValue, SEARCH_GROUP_ID},
    protocol::{Chip, ChipGroup, ParamsChange},
};

use crate::messages::MessageKey;

/// Full reset from the toolbar: removes the selected chips, then restores
/// every default filter over the result.
pub fn delete_filters(
    filters: &FilterMap,
    selected: &[ChipGroup],
    defaults: &FilterMap,
) -> ParamsChange {
    let mut change = remove_chips(filters, selected);
    if let Some(filter) = change.filter.as_mut() {
        for (category, value) in defaults {
            filter.insert(category.clone(), value.clone());
        }
    }
    change
}

/// Removes a single chip group; defaults are not restored.
pub fn delete_filter_group(filters: &FilterMap, selected: &[ChipGroup]) -> ParamsChange {
    remove_chips(filters, selected)
}

fn remove_chips(filters: &FilterMap, selected: &[ChipGroup]) -> ParamsChange {
    let mut filter = FilterMap::new();
    let mut search = None;

    for group in selected {
        if group.id == SEARCH_GROUP_ID {
            search = Some(String::new());
            continue;
        }

        let next = match filters.get(&group.id) {
            Some(FilterValue::List(active)) => {
                let to_remove: Vec<&str> = group.chips.iter().map(|chip| chip.id.as_str()).collect();
                FilterValue::List(
                    active
                        .iter()
                        .filter(|item| !to_remove.contains(&item.as_str()))
                        .cloned()
                        .collect(),
                )
            }
            Some(FilterValue::Scalar(_)) | None => FilterValue::Scalar(String::new()),
        };
        filter.insert(group.id.clone(), next);
    }

    ParamsChange {
        filter: Some(filter),
        search,
        ..ParamsChange::default()
    }
}

pub fn build_filter_chips(filters: &FilterMap, search: &str) -> Vec<ChipGroup> {
    let mut groups: Vec<ChipGroup> = filters
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(category, value)| ChipGroup {
            id: category.clone(),
            category: category.clone(),
            chips: value
                .values()
                .into_iter()
                .map(|item| Chip {
                    id: item.to_string(),
                    name: item.to_string(),
                })
                .collect(),
        })
        .collect();

    if !search.is_empty() {
        groups.push(ChipGroup {
            id: SEARCH_GROUP_ID.to_string(),
            category: "Search".to_string(),
            chips: vec![Chip {
                id: search.to_string(),
                name: search.to_string(),
            }],
        });
    }

    groups
}

pub fn delete_title_key(defaults: &FilterMap) -> MessageKey {
    if defaults.is_empty() {
        MessageKey::FiltersClear
    } else {
        MessageKey::FiltersReset
    }
}

#[cfg(test)]
#[path = "tests/filters_tests.rs"]
mod tests;
