//! Store seam and an in-memory store with the reducer semantics the
//! controller relies on.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use shared::{
    domain::{Metadata, QueryParams, Row, RowPage, SelectionSet},
    protocol::{ParamsChange, StoreAction},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    #[serde(default)]
    pub query_params: QueryParams,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub selected_rows: SelectionSet,
}

pub trait TableStore: Send + Sync {
    fn snapshot(&self) -> TableSnapshot;
    fn dispatch(&self, action: StoreAction);
}

pub fn reduce(state: &mut TableSnapshot, action: StoreAction) {
    match action {
        StoreAction::ChangeParams(change) => apply_params_change(&mut state.query_params, change),
        StoreAction::SelectEntities(updates) => state.selected_rows.apply(updates),
        StoreAction::RowsLoaded(page) => apply_rows_loaded(state, page),
        StoreAction::ClearSelection => state.selected_rows.clear(),
    }
}

/// A sort, filter or search change without an explicit offset returns to
/// the first page. A bare limit change keeps the current offset.
pub fn apply_params_change(params: &mut QueryParams, change: ParamsChange) {
    let resets_paging = change.offset.is_none()
        && (change.sort.is_some() || change.filter.is_some() || change.search.is_some());

    if let Some(limit) = change.limit {
        params.limit = limit;
    }
    if let Some(offset) = change.offset {
        params.offset = offset;
    }
    if let Some(sort) = change.sort {
        params.sort = (!sort.is_empty()).then_some(sort);
    }
    if let Some(search) = change.search {
        params.search = search;
    }
    if let Some(filter) = change.filter {
        for (category, value) in filter {
            if value.is_empty() {
                params.filter.remove(&category);
            } else {
                params.filter.insert(category, value);
            }
        }
    }
    if resets_paging {
        params.offset = 0;
    }
}

fn apply_rows_loaded(state: &mut TableSnapshot, page: RowPage) {
    let params = &state.query_params;
    state.metadata = Metadata {
        limit: page.meta.limit.unwrap_or(params.limit),
        offset: page.meta.offset.unwrap_or(params.offset),
        total_items: page.meta.total_items,
        sort: page.meta.sort.or_else(|| params.sort.clone()),
        search: params.search.clone(),
        filter: params.filter.clone(),
    };
    state.rows = page.data;
}

#[derive(Debug, Default)]
pub struct InMemoryTableStore {
    state: RwLock<TableSnapshot>,
}

impl InMemoryTableStore {
    pub fn new(initial: TableSnapshot) -> Self {
        Self {
            state: RwLock::new(initial),
        }
    }
}

impl TableStore for InMemoryTableStore {
    fn snapshot(&self) -> TableSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn dispatch(&self, action: StoreAction) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        reduce(&mut guard, action);
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
