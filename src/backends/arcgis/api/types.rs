use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{Basemap, MapLayer, PortalItem, PortalItemId, SpatialReference, WebMap};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalErrorBody {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// `portals/self`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSelfResponse {
    pub id: Option<String>,
    pub name: Option<String>,
    pub featured_items_group_query: Option<String>,
}

/// `search` and `community/groups` share the same paging envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<T> {
    pub total: Option<i64>,
    pub next_start: Option<i64>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: String,
    pub title: Option<String>,
    pub owner: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub snippet: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub avg_rating: Option<f32>,
    pub num_views: Option<u64>,
    /// Milliseconds since the epoch
    pub modified: Option<i64>,
}

impl From<ItemResponse> for PortalItem {
    fn from(item: ItemResponse) -> Self {
        PortalItem {
            title: item.title.unwrap_or_else(|| item.id.clone()),
            id: PortalItemId::new(item.id),
            owner: item.owner.unwrap_or_default(),
            item_type: item.item_type.unwrap_or_default(),
            snippet: item.snippet,
            thumbnail: item.thumbnail,
            tags: item.tags,
            avg_rating: item.avg_rating,
            num_views: item.num_views,
            modified: item.modified.and_then(DateTime::<Utc>::from_timestamp_millis),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupResponse {
    pub id: String,
    pub title: Option<String>,
}

/// `content/items/{id}/data` for a web map item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebMapData {
    pub version: Option<String>,
    pub operational_layers: Option<Vec<LayerResponse>>,
    pub base_map: Option<BaseMapResponse>,
    pub spatial_reference: Option<SpatialReferenceResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseMapResponse {
    pub title: Option<String>,
    #[serde(default)]
    pub base_map_layers: Vec<LayerResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerResponse {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub layer_type: Option<String>,
    pub visibility: Option<bool>,
    pub opacity: Option<f32>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialReferenceResponse {
    pub wkid: Option<u32>,
    pub latest_wkid: Option<u32>,
}

fn convert_layers(prefix: &str, layers: Vec<LayerResponse>) -> Vec<MapLayer> {
    layers
        .into_iter()
        .enumerate()
        .map(|(index, layer)| MapLayer {
            id: layer
                .id
                .unwrap_or_else(|| format!("{}-{}", prefix, index)),
            title: layer.title,
            layer_type: layer.layer_type,
            url: layer.url,
            visible: layer.visibility.unwrap_or(true),
            opacity: layer.opacity.unwrap_or(1.0).clamp(0.0, 1.0),
        })
        .collect()
}

impl WebMapData {
    /// A web map definition has a basemap, operational layers, or both.
    pub fn is_web_map(&self) -> bool {
        self.base_map.is_some() || self.operational_layers.is_some()
    }

    pub fn into_web_map(self, item: PortalItem) -> WebMap {
        let basemap = self
            .base_map
            .map(|basemap| Basemap {
                title: basemap.title.unwrap_or_default(),
                layers: convert_layers("basemap", basemap.base_map_layers),
            })
            .unwrap_or_default();

        WebMap {
            item,
            version: self.version,
            basemap,
            operational_layers: convert_layers(
                "layer",
                self.operational_layers.unwrap_or_default(),
            ),
            spatial_reference: self.spatial_reference.map(|sr| SpatialReference {
                wkid: sr.wkid,
                latest_wkid: sr.latest_wkid,
            }),
        }
    }
}
