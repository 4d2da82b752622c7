//! In-memory stand-ins for the browser side of the picker

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use crate::{
    geolocation::{Fix, GeolocationError, GeolocationOptions, GeolocationProvider, Notifier},
    map::{
        library::{MapContainer, MapLibrary, TileLayer},
        loader::{AssetInjector, LoadError},
    },
    picker::LocationForm,
    types::position::{LatLng, Position},
};

#[derive(Debug)]
struct FakeMap {
    container: MapContainer,
    center: LatLng,
    zoom: u8,
    tiles: Vec<u64>,
    markers: Vec<(u64, LatLng)>,
    click_subscriptions: usize,
}

#[derive(Default, Debug)]
struct FakeMapState {
    next_id: u64,
    maps: BTreeMap<u64, FakeMap>,
    maps_created: usize,
    maps_removed: usize,
}

impl FakeMapState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default, Debug)]
pub struct FakeMapLibrary {
    state: Mutex<FakeMapState>,
}

impl FakeMapLibrary {
    fn with_map<T>(&self, map: u64, f: impl FnOnce(&FakeMap) -> T) -> Option<T> {
        self.state.lock().unwrap().maps.get(&map).map(f)
    }

    pub fn only_live_map(&self) -> u64 {
        let state = self.state.lock().unwrap();
        assert_eq!(state.maps.len(), 1, "expected exactly one live map");
        *state.maps.keys().next().unwrap()
    }

    pub fn live_maps(&self) -> usize {
        self.state.lock().unwrap().maps.len()
    }

    pub fn maps_created(&self) -> usize {
        self.state.lock().unwrap().maps_created
    }

    pub fn maps_removed(&self) -> usize {
        self.state.lock().unwrap().maps_removed
    }

    pub fn center(&self, map: u64) -> Option<LatLng> {
        self.with_map(map, |m| m.center)
    }

    pub fn zoom_of(&self, map: u64) -> Option<u8> {
        self.with_map(map, |m| m.zoom)
    }

    pub fn container(&self, map: u64) -> Option<MapContainer> {
        self.with_map(map, |m| m.container.clone())
    }

    /// Simulates the user zooming
    pub fn set_zoom(&self, map: u64, zoom: u8) {
        if let Some(m) = self.state.lock().unwrap().maps.get_mut(&map) {
            m.zoom = zoom;
        }
    }

    pub fn tile_layers(&self, map: u64) -> usize {
        self.with_map(map, |m| m.tiles.len()).unwrap_or(0)
    }

    pub fn click_subscriptions(&self, map: u64) -> usize {
        self.with_map(map, |m| m.click_subscriptions).unwrap_or(0)
    }

    pub fn markers(&self, map: u64) -> Vec<LatLng> {
        self.with_map(map, |m| m.markers.iter().map(|(_, at)| *at).collect())
            .unwrap_or_default()
    }
}

impl MapLibrary for FakeMapLibrary {
    type Map = u64;
    type Layer = u64;

    fn create_map(&self, container: &MapContainer, center: LatLng, zoom: u8) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.maps.insert(
            id,
            FakeMap {
                container: container.clone(),
                center,
                zoom,
                tiles: vec![],
                markers: vec![],
                click_subscriptions: 0,
            },
        );
        state.maps_created += 1;
        id
    }

    fn add_tile_layer(&self, map: &u64, _tiles: &TileLayer) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.maps.get_mut(map).expect("no such map").tiles.push(id);
        id
    }

    fn add_marker(&self, map: &u64, at: LatLng) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state
            .maps
            .get_mut(map)
            .expect("no such map")
            .markers
            .push((id, at));
        id
    }

    fn remove_layer(&self, map: &u64, layer: u64) {
        let mut state = self.state.lock().unwrap();
        let m = state.maps.get_mut(map).expect("no such map");
        m.markers.retain(|(id, _)| *id != layer);
        m.tiles.retain(|id| *id != layer);
    }

    fn set_view(&self, map: &u64, center: LatLng, zoom: u8) {
        let mut state = self.state.lock().unwrap();
        let m = state.maps.get_mut(map).expect("no such map");
        m.center = center;
        m.zoom = zoom;
    }

    fn zoom(&self, map: &u64) -> u8 {
        self.zoom_of(*map).expect("no such map")
    }

    fn subscribe_clicks(&self, map: &u64) {
        let mut state = self.state.lock().unwrap();
        state
            .maps
            .get_mut(map)
            .expect("no such map")
            .click_subscriptions += 1;
    }

    fn remove_map(&self, map: u64) {
        let mut state = self.state.lock().unwrap();
        assert!(state.maps.remove(&map).is_some(), "map removed twice");
        state.maps_removed += 1;
    }
}

#[derive(Default)]
pub struct FakeInjector {
    existing: Mutex<Option<FakeMapLibrary>>,
    stylesheets: AtomicUsize,
    scripts: AtomicUsize,
    fail_script: AtomicBool,
}

impl FakeInjector {
    pub fn with_existing(library: FakeMapLibrary) -> Self {
        Self {
            existing: Mutex::new(Some(library)),
            ..Default::default()
        }
    }

    pub fn fail_next_script(&self) {
        self.fail_script.store(true, Ordering::SeqCst);
    }

    pub fn stylesheets(&self) -> usize {
        self.stylesheets.load(Ordering::SeqCst)
    }

    pub fn scripts(&self) -> usize {
        self.scripts.load(Ordering::SeqCst)
    }
}

impl AssetInjector for FakeInjector {
    type Library = FakeMapLibrary;

    fn existing(&self) -> Option<FakeMapLibrary> {
        self.existing.lock().unwrap().take()
    }

    async fn inject_stylesheet(&self, _href: &str) -> Result<(), LoadError> {
        tokio::task::yield_now().await;
        self.stylesheets.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn inject_script(&self, src: &str) -> Result<FakeMapLibrary, LoadError> {
        tokio::task::yield_now().await;
        self.scripts.fetch_add(1, Ordering::SeqCst);
        if self.fail_script.swap(false, Ordering::SeqCst) {
            return Err(LoadError::Asset {
                url: src.to_string(),
                reason: "network unavailable".to_string(),
            });
        }
        Ok(FakeMapLibrary::default())
    }
}

pub struct FakeGeolocation {
    result: Result<Fix, GeolocationError>,
    requests: AtomicUsize,
    last_options: Mutex<Option<GeolocationOptions>>,
}

impl FakeGeolocation {
    pub fn answering(result: Result<Fix, GeolocationError>) -> Self {
        Self {
            result,
            requests: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<GeolocationOptions> {
        *self.last_options.lock().unwrap()
    }
}

impl GeolocationProvider for FakeGeolocation {
    async fn current_position(
        &self,
        options: &GeolocationOptions,
    ) -> Result<Fix, GeolocationError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(*options);
        tokio::task::yield_now().await;
        self.result
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Parent form without an intensity field
#[derive(Debug, Default)]
pub struct CoordinatesOnly {
    pub position: Position,
}

impl LocationForm for CoordinatesOnly {
    fn latitude(&self) -> Option<f64> {
        self.position.latitude
    }

    fn longitude(&self) -> Option<f64> {
        self.position.longitude
    }

    fn set_lat(&mut self, lat: Option<f64>) {
        self.position.latitude = lat;
    }

    fn set_lng(&mut self, lng: Option<f64>) {
        self.position.longitude = lng;
    }
}
