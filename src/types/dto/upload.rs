use serde::{Deserialize, Serialize};

use crate::types::intensity::Intensity;

/// Arguments for creating an upload in the document store
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUpload {
    pub location_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
}
