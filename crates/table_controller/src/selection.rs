//! Row selection: bulk actions, single-row toggles and the asynchronous
//! "select all" fetch.

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use serde::{Deserialize, Serialize};
use shared::{
    domain::{Row, SelectionSet, SelectionValue},
    protocol::SelectedRow,
};
use tracing::{debug, info, warn};

use crate::{
    error::{Result, TableError},
    transport::RowFetcher,
};

/// Large enough that "select all" is never truncated in practice.
pub const SELECT_ALL_LIMIT: u32 = 999_999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionAction {
    None,
    Page,
    All,
    Row { index: usize, selected: bool },
}

impl SelectionAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Page => "page",
            Self::All => "all",
            Self::Row { .. } => "row",
        }
    }
}

pub type RowKeyFn = Arc<dyn Fn(&Row) -> Option<String> + Send + Sync>;
pub type PayloadFn = Arc<dyn Fn(&Row) -> Option<String> + Send + Sync>;

/// Builds a payload function from a template such as
/// `{identifier}-{available_evra}`. `{identifier}` expands to the table
/// scope, any other placeholder to the row field of that name. A row
/// missing one of the fields gets no payload.
pub fn template_payload(template: impl Into<String>, identifier: Option<String>) -> PayloadFn {
    let template = template.into();
    Arc::new(move |row: &Row| render_payload(&template, identifier.as_deref(), row))
}

fn render_payload(template: &str, identifier: Option<&str>, row: &Row) -> Option<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let end = start + rest[start..].find('}')?;
        rendered.push_str(&rest[..start]);
        let name = &rest[start + 1..end];
        let value = match name {
            "identifier" => identifier?,
            field => row.field_str(field)?,
        };
        rendered.push_str(value);
        rest = &rest[end + 1..];
    }
    rendered.push_str(rest);
    Some(rendered)
}

/// Computes the identity and the stored selection value of a row.
#[derive(Clone, Default)]
pub struct RowSelector {
    key_fn: Option<RowKeyFn>,
    payload_fn: Option<PayloadFn>,
}

impl fmt::Debug for RowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowSelector")
            .field("custom_key", &self.key_fn.is_some())
            .field("custom_payload", &self.payload_fn.is_some())
            .finish()
    }
}

impl RowSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_fn(mut self, key_fn: RowKeyFn) -> Self {
        self.key_fn = Some(key_fn);
        self
    }

    pub fn with_payload_fn(mut self, payload_fn: PayloadFn) -> Self {
        self.payload_fn = Some(payload_fn);
        self
    }

    pub fn row_key(&self, row: &Row) -> Option<String> {
        if let Some(key_fn) = &self.key_fn {
            return key_fn(row).filter(|key| !key.is_empty());
        }
        row.id
            .as_ref()
            .filter(|id| !id.is_empty())
            .or_else(|| row.name.as_ref().filter(|name| !name.is_empty()))
            .cloned()
    }

    pub fn selected_value(&self, row: &Row) -> SelectionValue {
        self.payload_fn
            .as_ref()
            .and_then(|payload_fn| payload_fn(row))
            .filter(|payload| !payload.is_empty())
            .map(SelectionValue::Payload)
            .unwrap_or(SelectionValue::SELECTED)
    }

    /// Zeroes every key currently present; keys are never removed.
    pub fn clear_all(&self, current: &SelectionSet) -> Vec<SelectedRow> {
        current
            .keys()
            .map(|id| SelectedRow::new(id, SelectionValue::UNSELECTED))
            .collect()
    }

    /// Selects every row whose checkbox is enabled.
    pub fn select_rows(&self, rows: &[Row]) -> Vec<SelectedRow> {
        rows.iter()
            .filter(|row| !row.disable_checkbox)
            .filter_map(|row| match self.row_key(row) {
                Some(id) => Some(SelectedRow::new(id, self.selected_value(row))),
                None => {
                    warn!("skipping row without id or name during bulk selection");
                    None
                }
            })
            .collect()
    }

    pub fn toggle_row(&self, rows: &[Row], index: usize, selected: bool) -> Result<SelectedRow> {
        let row = rows.get(index).ok_or_else(|| {
            TableError::validation(
                "row",
                format!("index {index} is outside the {} loaded rows", rows.len()),
            )
        })?;
        let id = self.row_key(row).ok_or_else(|| {
            TableError::validation("row", format!("row {index} has neither id nor name"))
        })?;
        let value = if selected {
            self.selected_value(row)
        } else {
            SelectionValue::UNSELECTED
        };
        Ok(SelectedRow::new(id, value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Apply(Vec<SelectedRow>),
    /// A newer selection action was issued while this one was fetching.
    Superseded { token: u64 },
}

pub struct SelectionCoordinator {
    selector: RowSelector,
    fetcher: Arc<dyn RowFetcher>,
    identifier: Option<String>,
    select_all_limit: u32,
    latest_request: AtomicU64,
}

impl SelectionCoordinator {
    pub fn new(fetcher: Arc<dyn RowFetcher>) -> Self {
        Self {
            selector: RowSelector::default(),
            fetcher,
            identifier: None,
            select_all_limit: SELECT_ALL_LIMIT,
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn with_selector(mut self, selector: RowSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_identifier(mut self, identifier: Option<String>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_select_all_limit(mut self, limit: u32) -> Self {
        self.select_all_limit = limit;
        self
    }

    pub fn selector(&self) -> &RowSelector {
        &self.selector
    }

    fn issue_token(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Invalidates any in-flight `All` without producing an update.
    pub fn supersede_pending(&self) -> u64 {
        self.issue_token()
    }

    fn is_latest(&self, token: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) == token
    }

    /// Computes the selection update for `action`. Only `All` suspends; its
    /// result is discarded if another action was issued in the meantime,
    /// and a failed fetch produces no update at all.
    pub async fn on_select(
        &self,
        action: SelectionAction,
        page_rows: &[Row],
        current: &SelectionSet,
    ) -> Result<SelectionOutcome> {
        let token = self.issue_token();
        let updates = match action {
            SelectionAction::None => self.selector.clear_all(current),
            SelectionAction::Page => self.selector.select_rows(page_rows),
            SelectionAction::Row { index, selected } => {
                vec![self.selector.toggle_row(page_rows, index, selected)?]
            }
            SelectionAction::All => {
                let page = self
                    .fetcher
                    .fetch_all(self.identifier.as_deref(), self.select_all_limit)
                    .await
                    .map_err(TableError::Fetch)?;
                if !self.is_latest(token) {
                    debug!(token, "discarding superseded select-all result");
                    return Ok(SelectionOutcome::Superseded { token });
                }
                let updates = self.selector.select_rows(&page.data);
                info!(
                    rows = updates.len(),
                    total = page.meta.total_items,
                    "select-all fetch resolved"
                );
                updates
            }
        };
        Ok(SelectionOutcome::Apply(updates))
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
