use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    geolocation::{Fix, GeolocationError, GeolocationOptions, GeolocationProvider, Notifier},
    map::{
        library::{MapContainer, MapLibrary, TileLayer},
        loader::{AssetInjector, MapLoader},
        session::MapSession,
    },
    types::{
        intensity::Intensity,
        position::{
            format_coordinate, parse_coordinate, CoordinateInput, LatLng, Position,
            DEFAULT_CENTER, DEFAULT_ZOOM,
        },
    },
};

/// The form that owns the report location. The picker only ever reads it and
/// calls its setters.
pub trait LocationForm {
    fn latitude(&self) -> Option<f64>;
    fn longitude(&self) -> Option<f64>;
    fn set_lat(&mut self, lat: Option<f64>);
    fn set_lng(&mut self, lng: Option<f64>);

    /// Whether the intensity control should be shown at all
    fn supports_intensity(&self) -> bool {
        false
    }

    fn intensity(&self) -> Option<Intensity> {
        None
    }

    fn set_intensity(&mut self, _intensity: Intensity) {}

    fn position(&self) -> Position {
        Position {
            latitude: self.latitude(),
            longitude: self.longitude(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Unloaded,
    LoadedNoMap,
    MapReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityOption {
    pub value: Intensity,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityControl {
    pub selected: Option<Intensity>,
    pub options: Vec<IntensityOption>,
}

/// Everything a host needs to draw the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView {
    pub latitude_text: String,
    pub longitude_text: String,
    /// Show the loading placeholder in place of the map
    pub map_loading: bool,
    pub locating: bool,
    pub intensity: Option<IntensityControl>,
}

/// Keeps the form's coordinates, the map marker and device fixes in step.
pub struct LocationPicker<I, G, N>
where
    I: AssetInjector,
    I::Library: MapLibrary,
{
    loader: Arc<MapLoader<I>>,
    geolocation: G,
    notifier: N,
    options: GeolocationOptions,
    tiles: TileLayer,
    library: Option<Arc<I::Library>>,
    container: Option<MapContainer>,
    session: Option<MapSession<I::Library>>,
    // Point the marker currently shows
    shown: Option<LatLng>,
    locating: bool,
}

impl<I, G, N> LocationPicker<I, G, N>
where
    I: AssetInjector,
    I::Library: MapLibrary,
    G: GeolocationProvider,
    N: Notifier,
{
    pub fn new(loader: Arc<MapLoader<I>>, geolocation: G, notifier: N) -> Self {
        Self {
            loader,
            geolocation,
            notifier,
            options: GeolocationOptions::default(),
            tiles: TileLayer::default(),
            library: None,
            container: None,
            session: None,
            shown: None,
            locating: false,
        }
    }

    pub fn with_tile_layer(mut self, tiles: TileLayer) -> Self {
        self.tiles = tiles;
        self
    }

    pub fn with_geolocation_options(mut self, options: GeolocationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> PickerState {
        match (&self.library, &self.session) {
            (None, _) => PickerState::Unloaded,
            (Some(_), None) => PickerState::LoadedNoMap,
            (Some(_), Some(_)) => PickerState::MapReady,
        }
    }

    pub fn library(&self) -> Option<&Arc<I::Library>> {
        self.library.as_ref()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn geolocation(&self) -> &G {
        &self.geolocation
    }

    pub fn is_locating(&self) -> bool {
        self.locating
    }

    pub fn has_marker(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.has_marker())
    }

    /// Loads the map library and, if the container is already there, builds the
    /// map. A load failure leaves the picker unloaded; manual entry keeps
    /// working and the next mount tries again.
    #[instrument(skip_all)]
    pub async fn mount<F: LocationForm + ?Sized>(&mut self, form: &F) -> PickerState {
        if self.library.is_none() {
            match self.loader.ensure_loaded().await {
                Ok(library) => self.library = Some(library),
                Err(e) => {
                    warn!(error = %e, "map library unavailable");
                    return self.state();
                }
            }
        }
        self.construct_map(form);
        self.state()
    }

    pub fn attach_container<F: LocationForm + ?Sized>(
        &mut self,
        container: MapContainer,
        form: &F,
    ) -> PickerState {
        if self.container.is_none() {
            self.container = Some(container);
        }
        self.construct_map(form);
        self.state()
    }

    fn construct_map<F: LocationForm + ?Sized>(&mut self, form: &F) {
        if self.session.is_some() {
            return;
        }
        let (Some(library), Some(container)) = (&self.library, &self.container) else {
            return;
        };
        let point = form.position().point();
        let mut session = MapSession::attach(
            library.clone(),
            container,
            point.unwrap_or(DEFAULT_CENTER),
            DEFAULT_ZOOM,
            &self.tiles,
        );
        if let Some(point) = point {
            session.replace_marker(point);
        }
        self.shown = point;
        self.session = Some(session);
        info!("map ready");
    }

    /// Follows the form after its coordinates changed. Re-centres and moves the
    /// marker when the form holds a full point the marker does not show yet.
    pub fn sync<F: LocationForm + ?Sized>(&mut self, form: &F) {
        let Some(session) = &mut self.session else {
            return;
        };
        let Some(point) = form.position().point() else {
            return;
        };
        if self.shown == Some(point) {
            return;
        }
        session.recenter(point);
        session.replace_marker(point);
        if let Some(previous) = self.shown {
            debug!(moved_m = previous.distance_to(&point), "marker moved");
        }
        self.shown = Some(point);
    }

    pub fn handle_map_click<F: LocationForm + ?Sized>(&mut self, form: &mut F, at: LatLng) {
        let at = at.rounded();
        if let Some(session) = &mut self.session {
            session.replace_marker(at);
            self.shown = Some(at);
        }
        form.set_lat(Some(at.lat));
        form.set_lng(Some(at.lng));
        debug!(lat = at.lat, lng = at.lng, "location picked on map");
    }

    pub fn input_latitude<F: LocationForm + ?Sized>(&mut self, form: &mut F, text: &str) {
        match parse_coordinate(text) {
            CoordinateInput::Clear => form.set_lat(None),
            CoordinateInput::Value(lat) => form.set_lat(Some(lat)),
            CoordinateInput::Invalid => return,
        }
        self.sync(form);
    }

    pub fn input_longitude<F: LocationForm + ?Sized>(&mut self, form: &mut F, text: &str) {
        match parse_coordinate(text) {
            CoordinateInput::Clear => form.set_lng(None),
            CoordinateInput::Value(lng) => form.set_lng(Some(lng)),
            CoordinateInput::Invalid => return,
        }
        self.sync(form);
    }

    /// Marks a lookup as in flight and hands back the options to request it
    /// with. Hosts that drive the device themselves render the view between
    /// this and [`apply_fix`](Self::apply_fix).
    pub fn begin_locate(&mut self) -> GeolocationOptions {
        self.locating = true;
        self.options
    }

    /// Asks the device for its position and applies the answer.
    #[instrument(skip_all)]
    pub async fn locate<F: LocationForm + ?Sized>(&mut self, form: &mut F) {
        let options = self.begin_locate();
        let result = self.geolocation.current_position(&options).await;
        self.apply_fix(form, result);
    }

    /// Applies a finished lookup. Safe to call after unmount: the form still
    /// gets the coordinates, the released map is left alone.
    pub fn apply_fix<F: LocationForm + ?Sized>(
        &mut self,
        form: &mut F,
        result: Result<Fix, GeolocationError>,
    ) {
        self.locating = false;
        match result {
            Ok(fix) => {
                let at = fix.lat_lng().rounded();
                form.set_lat(Some(at.lat));
                form.set_lng(Some(at.lng));
                info!(lat = at.lat, lng = at.lng, accuracy = ?fix.accuracy, "device location fixed");
                self.sync(form);
            }
            Err(e) => {
                warn!(error = %e, "device location failed");
                self.notifier.alert(e.notice());
            }
        }
    }

    pub fn select_intensity<F: LocationForm + ?Sized>(&self, form: &mut F, intensity: Intensity) {
        if form.supports_intensity() {
            form.set_intensity(intensity);
        }
    }

    /// Releases the map and its marker. The loaded library stays cached in the
    /// loader, so a later mount only rebuilds the map.
    pub fn unmount(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.detach();
        }
        self.library = None;
        self.container = None;
        self.shown = None;
        self.locating = false;
    }

    pub fn view<F: LocationForm + ?Sized>(&self, form: &F) -> PickerView {
        let intensity = form.supports_intensity().then(|| IntensityControl {
            selected: form.intensity(),
            options: Intensity::ALL
                .into_iter()
                .map(|value| IntensityOption {
                    value,
                    label: value.label(),
                    description: value.description(),
                })
                .collect(),
        });
        PickerView {
            latitude_text: format_coordinate(form.latitude()),
            longitude_text: format_coordinate(form.longitude()),
            map_loading: self.library.is_none(),
            locating: self.locating,
            intensity,
        }
    }
}
