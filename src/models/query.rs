use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const DEFAULT_SORT_FIELD: &str = "avgrating";
pub const DEFAULT_ITEM_TYPE_FILTER: &str = r#"type:"web map" NOT "web mapping application""#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed parameters applied to every catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default = "default_sort_field")]
    pub sort_field: String,

    #[serde(default)]
    pub sort_order: SortOrder,

    #[serde(default = "default_item_type_filter")]
    pub item_type_filter: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            sort_field: default_sort_field(),
            sort_order: SortOrder::default(),
            item_type_filter: default_item_type_filter(),
        }
    }
}

impl SearchSettings {
    pub fn query(&self, text: impl Into<String>) -> SearchQuery {
        SearchQuery {
            text: text.into(),
            item_type_filter: self.item_type_filter.clone(),
            limit: self.limit,
            sort_field: self.sort_field.clone(),
            sort_order: self.sort_order,
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_sort_field() -> String {
    DEFAULT_SORT_FIELD.to_string()
}

fn default_item_type_filter() -> String {
    DEFAULT_ITEM_TYPE_FILTER.to_string()
}

/// A ranked catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub item_type_filter: String,
    pub limit: usize,
    pub sort_field: String,
    pub sort_order: SortOrder,
}

impl SearchQuery {
    /// Free text followed by the item type constraint. Empty text leaves only
    /// the constraint, which broadens the query to every matching item.
    pub fn query_string(&self) -> String {
        let text = self.text.trim();
        let filter = self.item_type_filter.trim();
        match (text.is_empty(), filter.is_empty()) {
            (true, _) => filter.to_string(),
            (false, true) => text.to_string(),
            (false, false) => format!("{} {}", text, filter),
        }
    }
}
