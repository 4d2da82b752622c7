use std::{future::Future, time::Duration};

use thiserror::Error;

use crate::types::position::LatLng;

/// A single reading from the device's location services
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres
    pub accuracy: Option<f64>,
    /// Milliseconds since the unix epoch
    pub timestamp: Option<u64>,
}

impl Fix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            timestamp: None,
        }
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// How old a cached fix may be and still be returned
    pub maximum_age: Duration,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("geolocation is not supported")]
    Unsupported,
}

impl GeolocationError {
    /// Maps the browser's `GeolocationPositionError.code`
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::PositionUnavailable,
        }
    }

    /// Message shown to the user when a lookup fails
    pub fn notice(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => "Geolocation is not supported by this browser.",
            _ => "Unable to retrieve your location. Please enter coordinates manually.",
        }
    }
}

pub trait GeolocationProvider {
    fn current_position(
        &self,
        options: &GeolocationOptions,
    ) -> impl Future<Output = Result<Fix, GeolocationError>> + Send;
}

/// Provider for hosts without location services
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl GeolocationProvider for NoGeolocation {
    async fn current_position(
        &self,
        _options: &GeolocationOptions,
    ) -> Result<Fix, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Blocking, user-facing notices (an `alert` in the browser)
pub trait Notifier {
    fn alert(&self, message: &str);
}
