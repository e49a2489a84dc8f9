//! Bulk-select dropdown configuration.

use serde::Serialize;

use crate::{
    messages::{MessageKey, MessageLookup},
    selection::SelectionAction,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkSelectItem {
    pub title: String,
    pub action: SelectionAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkSelectConfig {
    pub count: usize,
    pub items: Vec<BulkSelectItem>,
    /// `None` renders the indeterminate state.
    pub checked: Option<bool>,
    pub is_disabled: bool,
    /// What clicking the checkbox itself does.
    pub toggle_action: SelectionAction,
}

pub fn build_bulk_select_config(
    selected_count: usize,
    total_items: usize,
    page_row_count: usize,
    messages: &dyn MessageLookup,
) -> BulkSelectConfig {
    let items = vec![
        BulkSelectItem {
            title: messages.format_message(MessageKey::BulkSelectNone, &[]),
            action: SelectionAction::None,
        },
        BulkSelectItem {
            title: messages.format_message(
                MessageKey::BulkSelectPage,
                &[("count", page_row_count.to_string())],
            ),
            action: SelectionAction::Page,
        },
        BulkSelectItem {
            title: messages.format_message(
                MessageKey::BulkSelectAll,
                &[("count", total_items.to_string())],
            ),
            action: SelectionAction::All,
        },
    ];

    let checked = if selected_count == 0 {
        Some(false)
    } else if selected_count == total_items {
        Some(true)
    } else {
        None
    };

    BulkSelectConfig {
        count: selected_count,
        items,
        checked,
        is_disabled: total_items == 0 && selected_count == 0,
        toggle_action: if selected_count == 0 {
            SelectionAction::All
        } else {
            SelectionAction::None
        },
    }
}

/// Expandable tables render a detail row under every record.
pub fn visible_page_rows(row_count: usize, collapsible: bool) -> usize {
    if collapsible {
        row_count / 2
    } else {
        row_count
    }
}

#[cfg(test)]
#[path = "tests/bulk_select_tests.rs"]
mod tests;
