use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_LIMIT: u32 = 20;

/// Category name the toolbar uses for the free-text search chip group.
pub const SEARCH_GROUP_ID: &str = "search";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    List(Vec<String>),
    Scalar(String),
}

impl FilterValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(values) => values.is_empty(),
            Self::Scalar(value) => value.is_empty(),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::List(values) => values.iter().map(String::as_str).collect(),
            Self::Scalar(value) if value.is_empty() => Vec::new(),
            Self::Scalar(value) => vec![value.as_str()],
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

pub type FilterMap = BTreeMap<String, FilterValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub limit: u32,
    pub offset: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default)]
    pub filter: FilterMap,
    #[serde(default)]
    pub search: String,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort: None,
            filter: FilterMap::new(),
            search: String::new(),
        }
    }
}

/// Paging state as last reported by the collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub limit: u32,
    pub offset: u32,
    #[serde(default)]
    pub total_items: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filter: FilterMap,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            total_items: 0,
            sort: None,
            search: String::new(),
            filter: FilterMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_true")]
    pub sortable: bool,
}

impl Column {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: true,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

fn default_true() -> bool {
    true
}

/// Direction-specific sort tokens for a column whose API sort key differs
/// from its display key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundSort {
    pub asc: String,
    pub desc: String,
}

impl CompoundSort {
    pub fn token(&self, direction: SortDirection) -> &str {
        match direction {
            SortDirection::Asc => &self.asc,
            SortDirection::Desc => &self.desc,
        }
    }
}

pub type CompoundSortMap = BTreeMap<String, CompoundSort>;

/// Selection state of one row: a plain flag, or an application payload
/// (a remediation filename, for example) standing in for `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    Flag(bool),
    Payload(String),
}

impl SelectionValue {
    pub const SELECTED: Self = Self::Flag(true);
    pub const UNSELECTED: Self = Self::Flag(false);

    pub fn is_selected(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Payload(payload) => !payload.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeMap<String, SelectionValue>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&SelectionValue> {
        self.0.get(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, value: SelectionValue) {
        self.0.insert(id.into(), value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SelectionValue)> {
        self.0.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Keys whose value is falsy are present but do not count.
    pub fn selected_count(&self) -> usize {
        self.0.values().filter(|value| value.is_selected()).count()
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, value)| value.is_selected())
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn apply<I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = crate::protocol::SelectedRow>,
    {
        for update in updates {
            self.0.insert(update.id, update.selected);
        }
    }
}

impl<K: Into<String>> FromIterator<(K, SelectionValue)> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = (K, SelectionValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(id, value)| (id.into(), value)).collect())
    }
}

/// One record of the collection as the endpoint returns it. Fields other
/// than the identity and checkbox flag are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "disableCheckbox",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub disable_checkbox: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Row {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disable_checkbox = true;
        self
    }

    /// Looks up `key` among the top-level fields, then inside a nested
    /// `attributes` object.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).or_else(|| {
            self.fields
                .get("attributes")
                .and_then(Value::as_object)
                .and_then(|attributes| attributes.get(key))
        })
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub total_items: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowPage {
    #[serde(default)]
    pub data: Vec<Row>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
