use serde::{Deserialize, Serialize};

use super::PortalItem;

/// A web map resolved from a portal item, ready to hand to a map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebMap {
    pub item: PortalItem,
    pub version: Option<String>,
    pub basemap: Basemap,
    pub operational_layers: Vec<MapLayer>,
    pub spatial_reference: Option<SpatialReference>,
}

impl WebMap {
    pub fn title(&self) -> &str {
        &self.item.title
    }

    pub fn visible_layers(&self) -> impl Iterator<Item = &MapLayer> {
        self.operational_layers.iter().filter(|layer| layer.visible)
    }

    pub fn layer_count(&self) -> usize {
        self.basemap.layers.len() + self.operational_layers.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Basemap {
    pub title: String,
    pub layers: Vec<MapLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayer {
    pub id: String,
    pub title: Option<String>,
    pub layer_type: Option<String>,
    pub url: Option<String>,
    pub visible: bool,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialReference {
    pub wkid: Option<u32>,
    pub latest_wkid: Option<u32>,
}
