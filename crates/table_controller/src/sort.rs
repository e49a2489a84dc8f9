//! Column index ⇄ sort parameter translation.

use serde::{Deserialize, Serialize};
use shared::{
    domain::{Column, CompoundSortMap, SortDirection},
    protocol::ParamsChange,
};

use crate::error::{Result, TableError};

/// The sort indicator the table view renders: a display column index and
/// a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    pub index: usize,
    pub direction: SortDirection,
}

/// Columns as the table view numbers them. `leading_columns` counts the
/// non-data columns (a checkbox, an expand toggle) in front of `columns`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub leading_columns: usize,
    #[serde(default)]
    pub compound_sort: CompoundSortMap,
}

impl ColumnLayout {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            leading_columns: 0,
            compound_sort: CompoundSortMap::new(),
        }
    }

    pub fn with_leading_columns(mut self, leading_columns: usize) -> Self {
        self.leading_columns = leading_columns;
        self
    }

    pub fn with_compound_sort(mut self, compound_sort: CompoundSortMap) -> Self {
        self.compound_sort = compound_sort;
        self
    }

    pub fn resolve_column(&self, index: usize) -> Result<&Column> {
        let position = index.checked_sub(self.leading_columns).ok_or_else(|| {
            TableError::Configuration(format!(
                "column {index} is one of {} leading non-data columns",
                self.leading_columns
            ))
        })?;
        let column = self.columns.get(position).ok_or_else(|| {
            TableError::Configuration(format!(
                "column {index} is out of range for {} data columns",
                self.columns.len()
            ))
        })?;
        if !column.sortable {
            return Err(TableError::Configuration(format!(
                "column '{}' is not sortable",
                column.key
            )));
        }
        Ok(column)
    }

    pub fn sort_param(&self, index: usize, direction: SortDirection) -> Result<String> {
        let column = self.resolve_column(index)?;
        if let Some(compound) = self.compound_sort.get(&column.key) {
            return Ok(compound.token(direction).to_string());
        }
        Ok(match direction {
            SortDirection::Asc => column.key.clone(),
            SortDirection::Desc => format!("-{}", column.key),
        })
    }

    /// Same as [`ColumnLayout::sort_param`] for callers that name the
    /// column by key instead of display index.
    pub fn sort_param_by_key(&self, key: &str, direction: SortDirection) -> Result<String> {
        let position = self
            .columns
            .iter()
            .position(|column| column.key == key)
            .ok_or_else(|| TableError::Configuration(format!("no column with key '{key}'")))?;
        self.sort_param(position + self.leading_columns, direction)
    }

    pub fn on_sort(&self, index: usize, direction: SortDirection) -> Result<ParamsChange> {
        Ok(ParamsChange {
            sort: Some(self.sort_param(index, direction)?),
            ..ParamsChange::default()
        })
    }

    /// Inverse of [`ColumnLayout::sort_param`]: recovers the indicator for
    /// a sort string the store currently holds.
    pub fn sort_by_from_metadata(&self, sort: Option<&str>) -> Result<Option<SortBy>> {
        let Some(sort) = sort.filter(|sort| !sort.is_empty()) else {
            return Ok(None);
        };

        let (key, direction) = self
            .compound_origin(sort)
            .unwrap_or_else(|| match sort.strip_prefix('-') {
                Some(bare) => (bare, SortDirection::Desc),
                None => (sort, SortDirection::Asc),
            });

        let position = self
            .columns
            .iter()
            .position(|column| column.key == key)
            .ok_or_else(|| {
                TableError::Configuration(format!("sort key '{key}' matches no column"))
            })?;

        Ok(Some(SortBy {
            index: position + self.leading_columns,
            direction,
        }))
    }

    fn compound_origin<'a>(&'a self, token: &str) -> Option<(&'a str, SortDirection)> {
        self.compound_sort.iter().find_map(|(key, compound)| {
            if compound.asc == token {
                Some((key.as_str(), SortDirection::Asc))
            } else if compound.desc == token {
                Some((key.as_str(), SortDirection::Desc))
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
