use serde::Serialize;

use crate::{
    geolocation::GeolocationOptions,
    map::library::{MapAssets, TileLayer},
    types::position::{LatLng, DEFAULT_CENTER, DEFAULT_ZOOM},
};

/// What a browser host needs to set up the picker
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PickerConfig {
    pub default_center: LatLng,
    pub default_zoom: u8,
    pub tile_layer: TileLayer,
    pub assets: MapAssets,
    pub geolocation: PositionOptions,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            tile_layer: TileLayer::default(),
            assets: MapAssets::default(),
            geolocation: GeolocationOptions::default().into(),
        }
    }
}

/// Shaped like the browser's `PositionOptions`, durations in milliseconds
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: u64,
    pub maximum_age: u64,
}

impl From<GeolocationOptions> for PositionOptions {
    fn from(value: GeolocationOptions) -> Self {
        Self {
            enable_high_accuracy: value.enable_high_accuracy,
            timeout: value.timeout.as_millis() as u64,
            maximum_age: value.maximum_age.as_millis() as u64,
        }
    }
}
