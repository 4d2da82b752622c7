use serde::{Deserialize, Serialize};

use crate::types::position::LatLng;

/// Element the map renders into
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MapContainer(pub String);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
        }
    }
}

/// Stylesheet and script that provide the map library in the page
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MapAssets {
    pub stylesheet_url: String,
    pub script_url: String,
}

impl Default for MapAssets {
    fn default() -> Self {
        Self {
            stylesheet_url: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css".to_string(),
            script_url: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js".to_string(),
        }
    }
}

/// The rendering library once it is present in the page. Handles are opaque to
/// the picker; the library decides what a map or a layer is.
pub trait MapLibrary {
    type Map;
    type Layer;

    fn create_map(&self, container: &MapContainer, center: LatLng, zoom: u8) -> Self::Map;
    fn add_tile_layer(&self, map: &Self::Map, tiles: &TileLayer) -> Self::Layer;
    fn add_marker(&self, map: &Self::Map, at: LatLng) -> Self::Layer;
    fn remove_layer(&self, map: &Self::Map, layer: Self::Layer);
    fn set_view(&self, map: &Self::Map, center: LatLng, zoom: u8);
    fn zoom(&self, map: &Self::Map) -> u8;
    /// Route clicks on this map back to the host
    fn subscribe_clicks(&self, map: &Self::Map);
    fn remove_map(&self, map: Self::Map);
}
