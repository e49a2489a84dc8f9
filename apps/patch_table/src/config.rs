use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shared::domain::{Column, CompoundSortMap, FilterMap};
use table_controller::{
    selection::{template_payload, SELECT_ALL_LIMIT},
    ColumnLayout, ControllerOptions, RowSelector,
};

pub const DEFAULT_CONFIG_FILE: &str = "patch-table.toml";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub api_base_url: Option<String>,
    pub collection_path: String,
    pub identifier: Option<String>,
    pub select_all_limit: u32,
    pub leading_columns: usize,
    pub columns: Vec<Column>,
    pub compound_sort: CompoundSortMap,
    pub default_filters: FilterMap,
    pub collapsible_rows: bool,
    /// Template for the per-row selection payload, e.g.
    /// `{identifier}-{available_evra}`.
    pub payload_template: Option<String>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            collection_path: "packages/{id}/systems".into(),
            identifier: None,
            select_all_limit: SELECT_ALL_LIMIT,
            leading_columns: 0,
            columns: vec![
                Column::new("display_name", "Name"),
                Column::new("installed_evra", "Installed version"),
                Column::new("available_evra", "Latest version"),
                Column::new("last_upload", "Last seen"),
            ],
            compound_sort: CompoundSortMap::new(),
            default_filters: FilterMap::new(),
            collapsible_rows: false,
            payload_template: None,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn controller_options(&self) -> ControllerOptions {
        let mut selector = RowSelector::new();
        if let Some(template) = &self.payload_template {
            selector = selector.with_payload_fn(template_payload(
                template.clone(),
                self.identifier.clone(),
            ));
        }

        ControllerOptions {
            layout: ColumnLayout::new(self.columns.clone())
                .with_leading_columns(self.leading_columns)
                .with_compound_sort(self.compound_sort.clone()),
            default_filters: self.default_filters.clone(),
            identifier: self.identifier.clone(),
            select_all_limit: self.select_all_limit,
            collapsible_rows: self.collapsible_rows,
            selector,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    api_base_url: Option<String>,
    collection_path: Option<String>,
    identifier: Option<String>,
    select_all_limit: Option<u32>,
    leading_columns: Option<usize>,
    columns: Option<Vec<Column>>,
    compound_sort: Option<CompoundSortMap>,
    default_filters: Option<FilterMap>,
    collapsible_rows: Option<bool>,
    payload_template: Option<String>,
    log_filter: Option<String>,
}

/// Defaults, then the TOML file, then `PATCH_TABLE__*` environment
/// variables. Only an explicitly requested file is required to exist.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match explicit {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            apply_file_config(&mut settings, &raw)
                .with_context(|| format!("invalid config '{}'", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
                apply_file_config(&mut settings, &raw)
                    .with_context(|| format!("invalid config '{DEFAULT_CONFIG_FILE}'"))?;
            }
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn apply_file_config(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = Some(v);
    }
    if let Some(v) = file_cfg.collection_path {
        settings.collection_path = v;
    }
    if let Some(v) = file_cfg.identifier {
        settings.identifier = Some(v);
    }
    if let Some(v) = file_cfg.select_all_limit {
        settings.select_all_limit = v;
    }
    if let Some(v) = file_cfg.leading_columns {
        settings.leading_columns = v;
    }
    if let Some(v) = file_cfg.columns {
        settings.columns = v;
    }
    if let Some(v) = file_cfg.compound_sort {
        settings.compound_sort = v;
    }
    if let Some(v) = file_cfg.default_filters {
        settings.default_filters = v;
    }
    if let Some(v) = file_cfg.collapsible_rows {
        settings.collapsible_rows = v;
    }
    if let Some(v) = file_cfg.payload_template {
        settings.payload_template = Some(v);
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }

    Ok(())
}

pub fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("PATCH_TABLE__API_BASE_URL") {
        settings.api_base_url = Some(v);
    }
    if let Some(v) = var("PATCH_TABLE__IDENTIFIER") {
        settings.identifier = Some(v);
    }
    if let Some(v) = var("PATCH_TABLE__SELECT_ALL_LIMIT") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.select_all_limit = parsed;
        }
    }
    if let Some(v) = var("PATCH_TABLE__LOG") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
