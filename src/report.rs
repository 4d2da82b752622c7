use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    picker::LocationForm,
    types::{
        dto::upload::NewUpload,
        intensity::Intensity,
        position::{round_coordinate, LatLng},
    },
};

#[derive(Debug, Error, PartialEq)]
pub enum SubmitError {
    #[error("location name is required")]
    MissingLocationName,
    #[error("latitude is required")]
    MissingLatitude,
    #[error("longitude is required")]
    MissingLongitude,
    #[error("latitude {0} is outside -90..90")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside -180..180")]
    LongitudeOutOfRange(f64),
}

/// The report form a picker writes into. It owns the location until the
/// report is submitted.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub intensity: Option<Intensity>,
}

impl ReportDraft {
    pub fn submit(&self) -> Result<NewUpload, SubmitError> {
        let location_name = self.location_name.trim();
        if location_name.is_empty() {
            return Err(SubmitError::MissingLocationName);
        }
        let latitude = self.latitude.ok_or(SubmitError::MissingLatitude)?;
        let longitude = self.longitude.ok_or(SubmitError::MissingLongitude)?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SubmitError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SubmitError::LongitudeOutOfRange(longitude));
        }
        let at = LatLng::new(latitude, longitude).rounded();
        Ok(NewUpload {
            location_name: location_name.to_string(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            latitude: at.lat,
            longitude: at.lng,
            intensity: self.intensity,
        })
    }
}

impl LocationForm for ReportDraft {
    fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    fn set_lat(&mut self, lat: Option<f64>) {
        self.latitude = lat.map(round_coordinate);
    }

    fn set_lng(&mut self, lng: Option<f64>) {
        self.longitude = lng.map(round_coordinate);
    }

    fn supports_intensity(&self) -> bool {
        true
    }

    fn intensity(&self) -> Option<Intensity> {
        self.intensity
    }

    fn set_intensity(&mut self, intensity: Intensity) {
        self.intensity = Some(intensity);
    }
}
