use serde::{Deserialize, Serialize};

use crate::domain::{FilterMap, RowPage, SelectionValue};

/// A partial update of the query parameters. Only present fields are
/// applied by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ParamsChange {
    pub fn is_empty(&self) -> bool {
        self.limit.is_none()
            && self.offset.is_none()
            && self.sort.is_none()
            && self.filter.is_none()
            && self.search.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedRow {
    pub id: String,
    pub selected: SelectionValue,
}

impl SelectedRow {
    pub fn new(id: impl Into<String>, selected: SelectionValue) -> Self {
        Self {
            id: id.into(),
            selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub id: String,
    pub name: String,
}

/// One removable group of chips in the active-filters bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipGroup {
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub chips: Vec<Chip>,
}

impl ChipGroup {
    pub fn new(id: impl Into<String>, chip_ids: &[&str]) -> Self {
        let id = id.into();
        Self {
            category: id.clone(),
            id,
            chips: chip_ids
                .iter()
                .map(|chip| Chip {
                    id: (*chip).to_string(),
                    name: (*chip).to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StoreAction {
    ChangeParams(ParamsChange),
    SelectEntities(Vec<SelectedRow>),
    RowsLoaded(RowPage),
    ClearSelection,
}

impl StoreAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChangeParams(_) => "change_params",
            Self::SelectEntities(_) => "select_entities",
            Self::RowsLoaded(_) => "rows_loaded",
            Self::ClearSelection => "clear_selection",
        }
    }
}
