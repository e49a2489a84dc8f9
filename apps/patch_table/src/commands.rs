//! CLI commands mapped onto table controller operations.

use clap::{Subcommand, ValueEnum};
use serde_json::{json, Value};
use shared::{domain::SortDirection, protocol::ChipGroup};
use table_controller::{SelectionAction, SelectionOutcome, TableController};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Asc => SortDirection::Asc,
            DirectionArg::Desc => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum SelectTarget {
    /// Mark every selected row as unselected
    None,
    /// Select the rows of the loaded page
    Page,
    /// Fetch the whole collection and select every row
    All,
    /// Toggle one row of the loaded page
    Row {
        index: usize,
        #[arg(long)]
        deselect: bool,
    },
    /// Forget every key, including unselected ones
    Clear,
}

impl SelectTarget {
    /// `None` for `clear`, which is not a selection action.
    fn action(self) -> Option<SelectionAction> {
        match self {
            Self::Clear => None,
            Self::None => Some(SelectionAction::None),
            Self::Page => Some(SelectionAction::Page),
            Self::All => Some(SelectionAction::All),
            Self::Row { index, deselect } => Some(SelectionAction::Row {
                index,
                selected: !deselect,
            }),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print pagination, sort, chips and bulk-select state
    Show,
    /// Jump to a 1-indexed page
    SetPage { page: u32 },
    /// Change the page size and return to the first page
    PerPage { per_page: u32 },
    /// Apply the paginator's page/per-page pair, skipping no-op changes
    Refresh { page: u32, per_page: u32 },
    /// Sort by a table column index
    Sort {
        index: usize,
        #[arg(value_enum, default_value = "asc")]
        direction: DirectionArg,
    },
    /// List the active filter chips
    Chips,
    /// Remove chips from one category and restore default filters
    RemoveChip { category: String, chips: Vec<String> },
    /// Remove chips from one category without restoring defaults
    RemoveGroup { category: String, chips: Vec<String> },
    /// Remove every chip and restore default filters
    ResetFilters,
    /// Change the row selection
    Select {
        #[command(subcommand)]
        target: SelectTarget,
    },
    /// Print the bulk-select dropdown configuration
    BulkSelect,
    /// Fetch the page described by the current query parameters
    Load,
    /// Fetch one page sorted by a column key and record it
    LoadEntities {
        page: u32,
        per_page: u32,
        #[arg(long)]
        order_by: Option<String>,
        #[arg(long, value_enum, default_value = "asc")]
        direction: DirectionArg,
    },
}

fn chip_group(category: String, chips: &[String]) -> ChipGroup {
    let chip_ids: Vec<&str> = chips.iter().map(String::as_str).collect();
    ChipGroup::new(category, &chip_ids)
}

pub async fn run(command: Command, controller: &TableController) -> anyhow::Result<Value> {
    let output = match command {
        Command::Show => json!({
            "pagination": controller.page_per_page()?,
            "sort_by": controller.sort_by()?,
            "chips": controller.filter_chips(),
            "delete_title": controller.delete_title(),
            "bulk_select": controller.bulk_select_config(),
            "selected_ids": controller.selected_ids(),
        }),
        Command::SetPage { page } => serde_json::to_value(controller.on_set_page(page)?)?,
        Command::PerPage { per_page } => {
            serde_json::to_value(controller.on_per_page_select(per_page)?)?
        }
        Command::Refresh { page, per_page } => {
            serde_json::to_value(controller.on_refresh(page, per_page)?)?
        }
        Command::Sort { index, direction } => {
            serde_json::to_value(controller.on_sort(index, direction.into())?)?
        }
        Command::Chips => serde_json::to_value(controller.filter_chips())?,
        Command::RemoveChip { category, chips } => {
            serde_json::to_value(controller.delete_filters(&[chip_group(category, &chips)]))?
        }
        Command::RemoveGroup { category, chips } => serde_json::to_value(
            controller.delete_filter_group(&[chip_group(category, &chips)]),
        )?,
        Command::ResetFilters => {
            let chips = controller.filter_chips();
            serde_json::to_value(controller.delete_filters(&chips))?
        }
        Command::Select { target } => match target.action() {
            Some(action) => match controller.on_select(action).await? {
                SelectionOutcome::Apply(updates) => json!({ "applied": updates }),
                SelectionOutcome::Superseded { token } => json!({ "superseded": token }),
            },
            None => {
                controller.clear_selection();
                json!({ "cleared": true })
            }
        },
        Command::BulkSelect => serde_json::to_value(controller.bulk_select_config())?,
        Command::Load => json!({ "loaded": controller.load_page().await? }),
        Command::LoadEntities {
            page,
            per_page,
            order_by,
            direction,
        } => {
            let order = order_by
                .as_deref()
                .map(|key| (key, SortDirection::from(direction)));
            json!({ "loaded": controller.load_entities(page, per_page, order).await? })
        }
    };
    Ok(output)
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
