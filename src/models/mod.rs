mod identifiers;
pub mod query;
pub mod web_map;

pub use identifiers::{PortalId, PortalItemId};
pub use query::{SearchQuery, SearchSettings, SortOrder};
pub use web_map::{Basemap, MapLayer, SpatialReference, WebMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry returned by a portal search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalItem {
    pub id: PortalItemId,
    pub title: String,
    pub owner: String,
    pub item_type: String,
    pub snippet: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub avg_rating: Option<f32>,
    pub num_views: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
}

impl PortalItem {
    pub fn new(id: impl Into<PortalItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            owner: String::new(),
            item_type: "Web Map".to_string(),
            snippet: None,
            thumbnail: None,
            tags: Vec::new(),
            avg_rating: None,
            num_views: None,
            modified: None,
        }
    }

    pub fn is_web_map(&self) -> bool {
        self.item_type.eq_ignore_ascii_case("web map")
    }
}

/// Handle to a connected portal.
///
/// Created once per view model and shared by every operation after that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalSession {
    pub portal_url: String,
    pub portal_id: Option<PortalId>,
    pub portal_name: Option<String>,
    /// Group query selecting the portal's featured content, if it has any
    pub featured_items_group_query: Option<String>,
}

impl PortalSession {
    pub fn anonymous(portal_url: impl Into<String>) -> Self {
        Self {
            portal_url: portal_url.into(),
            portal_id: None,
            portal_name: None,
            featured_items_group_query: None,
        }
    }
}
