use std::sync::Arc;

use shared::{
    domain::{FilterMap, SortDirection},
    protocol::{ChipGroup, ParamsChange, StoreAction},
};
use tracing::debug;

use crate::{
    bulk_select::{build_bulk_select_config, visible_page_rows, BulkSelectConfig},
    error::{Result, TableError},
    filters,
    messages::MessageLookup,
    pagination::{self, PagePerPage},
    selection::{
        RowSelector, SelectionAction, SelectionCoordinator, SelectionOutcome, SELECT_ALL_LIMIT,
    },
    sort::{ColumnLayout, SortBy},
    store::{self, TableStore},
    transport::RowFetcher,
};

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub layout: ColumnLayout,
    pub default_filters: FilterMap,
    /// Scope passed to the fetcher, such as the package whose systems are
    /// listed.
    pub identifier: Option<String>,
    pub select_all_limit: u32,
    pub collapsible_rows: bool,
    pub selector: RowSelector,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::default(),
            default_filters: FilterMap::new(),
            identifier: None,
            select_all_limit: SELECT_ALL_LIMIT,
            collapsible_rows: false,
            selector: RowSelector::default(),
        }
    }
}

/// Wires the translators to an injected store, fetcher and message catalog.
pub struct TableController {
    store: Arc<dyn TableStore>,
    fetcher: Arc<dyn RowFetcher>,
    messages: Arc<dyn MessageLookup>,
    selection: SelectionCoordinator,
    options: ControllerOptions,
}

impl TableController {
    pub fn new(
        store: Arc<dyn TableStore>,
        fetcher: Arc<dyn RowFetcher>,
        messages: Arc<dyn MessageLookup>,
        options: ControllerOptions,
    ) -> Self {
        let selection = SelectionCoordinator::new(fetcher.clone())
            .with_selector(options.selector.clone())
            .with_identifier(options.identifier.clone())
            .with_select_all_limit(options.select_all_limit);
        Self {
            store,
            fetcher,
            messages,
            selection,
            options,
        }
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    fn dispatch(&self, action: StoreAction) {
        debug!(action = action.name(), "dispatching store action");
        self.store.dispatch(action);
    }

    fn apply(&self, change: ParamsChange) -> ParamsChange {
        if !change.is_empty() {
            self.dispatch(StoreAction::ChangeParams(change.clone()));
        }
        change
    }

    pub fn page_per_page(&self) -> Result<PagePerPage> {
        let metadata = self.store.snapshot().metadata;
        pagination::page_from_offset(metadata.limit, metadata.offset)
    }

    pub fn on_set_page(&self, page: u32) -> Result<ParamsChange> {
        let limit = self.store.snapshot().metadata.limit;
        Ok(self.apply(pagination::set_page(page, limit)?))
    }

    pub fn on_per_page_select(&self, per_page: u32) -> Result<ParamsChange> {
        Ok(self.apply(pagination::per_page_select(per_page)?))
    }

    /// Returns the emitted change; nothing is dispatched when it is empty.
    pub fn on_refresh(&self, page: u32, per_page: u32) -> Result<ParamsChange> {
        let metadata = self.store.snapshot().metadata;
        Ok(self.apply(pagination::refresh(page, per_page, &metadata)?))
    }

    pub fn on_sort(&self, index: usize, direction: SortDirection) -> Result<ParamsChange> {
        Ok(self.apply(self.options.layout.on_sort(index, direction)?))
    }

    pub fn sort_by(&self) -> Result<Option<SortBy>> {
        let metadata = self.store.snapshot().metadata;
        self.options
            .layout
            .sort_by_from_metadata(metadata.sort.as_deref())
    }

    pub fn filter_chips(&self) -> Vec<ChipGroup> {
        let params = self.store.snapshot().query_params;
        filters::build_filter_chips(&params.filter, &params.search)
    }

    pub fn delete_filters(&self, selected: &[ChipGroup]) -> ParamsChange {
        let params = self.store.snapshot().query_params;
        self.apply(filters::delete_filters(
            &params.filter,
            selected,
            &self.options.default_filters,
        ))
    }

    pub fn delete_filter_group(&self, selected: &[ChipGroup]) -> ParamsChange {
        let params = self.store.snapshot().query_params;
        self.apply(filters::delete_filter_group(&params.filter, selected))
    }

    pub fn delete_title(&self) -> String {
        self.messages.format_message(
            filters::delete_title_key(&self.options.default_filters),
            &[],
        )
    }

    /// Dispatches the selection update unless a newer action superseded it.
    pub async fn on_select(&self, action: SelectionAction) -> Result<SelectionOutcome> {
        let snapshot = self.store.snapshot();
        let action_name = action.name();
        let outcome = self
            .selection
            .on_select(action, &snapshot.rows, &snapshot.selected_rows)
            .await?;
        match &outcome {
            SelectionOutcome::Apply(updates) => {
                debug!(action = action_name, rows = updates.len(), "applying selection");
                self.dispatch(StoreAction::SelectEntities(updates.clone()));
            }
            SelectionOutcome::Superseded { token } => {
                debug!(action = action_name, token, "selection superseded");
            }
        }
        Ok(outcome)
    }

    /// Drops every key from the selection and discards a pending
    /// select-all.
    pub fn clear_selection(&self) {
        let token = self.selection.supersede_pending();
        debug!(token, "clearing selection");
        self.dispatch(StoreAction::ClearSelection);
    }

    pub fn bulk_select_config(&self) -> BulkSelectConfig {
        let snapshot = self.store.snapshot();
        build_bulk_select_config(
            snapshot.selected_rows.selected_count(),
            snapshot.metadata.total_items,
            visible_page_rows(snapshot.rows.len(), self.options.collapsible_rows),
            self.messages.as_ref(),
        )
    }

    /// Identifiers handed to a remediation request.
    pub fn selected_ids(&self) -> Vec<String> {
        self.store.snapshot().selected_rows.selected_ids()
    }

    pub async fn load_page(&self) -> Result<usize> {
        let params = self.store.snapshot().query_params;
        let page = self
            .fetcher
            .fetch_page(self.options.identifier.as_deref(), &params)
            .await
            .map_err(TableError::Fetch)?;
        let loaded = page.data.len();
        self.dispatch(StoreAction::RowsLoaded(page));
        Ok(loaded)
    }

    /// Fetches `page` of `per_page` rows ordered by the column named
    /// `order_by`, then records the paging, the sort and the rows. A failed
    /// fetch records nothing.
    pub async fn load_entities(
        &self,
        page: u32,
        per_page: u32,
        order_by: Option<(&str, SortDirection)>,
    ) -> Result<usize> {
        let sort = order_by
            .map(|(key, direction)| self.options.layout.sort_param_by_key(key, direction))
            .transpose()?;
        let change = ParamsChange {
            offset: Some(pagination::offset_from_page(page, per_page)?),
            sort,
            ..pagination::per_page_select(per_page)?
        };

        let mut params = self.store.snapshot().query_params;
        store::apply_params_change(&mut params, change.clone());
        let rows = self
            .fetcher
            .fetch_page(self.options.identifier.as_deref(), &params)
            .await
            .map_err(TableError::Fetch)?;

        let loaded = rows.data.len();
        self.dispatch(StoreAction::ChangeParams(change));
        self.dispatch(StoreAction::RowsLoaded(rows));
        Ok(loaded)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
