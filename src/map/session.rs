use std::sync::Arc;

use tracing::debug;

use super::library::{MapContainer, MapLibrary, TileLayer};
use crate::types::position::LatLng;

/// One map instance and the single marker on it. Dropping the session
/// releases both.
pub struct MapSession<L: MapLibrary> {
    library: Arc<L>,
    map: Option<L::Map>,
    marker: Option<L::Layer>,
}

impl<L: MapLibrary> MapSession<L> {
    /// Builds the map, lays the tiles and subscribes to clicks. Called once per
    /// session.
    pub fn attach(
        library: Arc<L>,
        container: &MapContainer,
        center: LatLng,
        zoom: u8,
        tiles: &TileLayer,
    ) -> Self {
        let map = library.create_map(container, center, zoom);
        library.add_tile_layer(&map, tiles);
        library.subscribe_clicks(&map);
        debug!(container = %container.0, lat = center.lat, lng = center.lng, "map attached");
        Self {
            library,
            map: Some(map),
            marker: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.map.is_some()
    }

    pub fn has_marker(&self) -> bool {
        self.marker.is_some()
    }

    /// Swaps the marker for one at `at`. Returns false once detached.
    pub fn replace_marker(&mut self, at: LatLng) -> bool {
        let Some(map) = &self.map else {
            return false;
        };
        if let Some(previous) = self.marker.take() {
            self.library.remove_layer(map, previous);
        }
        self.marker = Some(self.library.add_marker(map, at));
        true
    }

    /// Centres on `at` at the current zoom
    pub fn recenter(&self, at: LatLng) {
        if let Some(map) = &self.map {
            let zoom = self.library.zoom(map);
            self.library.set_view(map, at, zoom);
        }
    }

    pub fn detach(&mut self) {
        let Some(map) = self.map.take() else {
            return;
        };
        if let Some(marker) = self.marker.take() {
            self.library.remove_layer(&map, marker);
        }
        self.library.remove_map(map);
        debug!("map detached");
    }
}

impl<L: MapLibrary> Drop for MapSession<L> {
    fn drop(&mut self) {
        self.detach();
    }
}
