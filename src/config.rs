use std::net::SocketAddr;

use color_eyre::eyre::{Result, WrapErr};

use crate::types::dto::picker_config::PickerConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ANALYSIS_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Base URL of the image-analysis service behind the proxy
    pub analysis_url: String,
    pub picker: PickerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let bind_addr = var("BLUECARBON_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .wrap_err("BLUECARBON_BIND_ADDR is not a socket address")?;
        let analysis_url = var("BLUECARBON_ANALYSIS_URL")
            .unwrap_or_else(|| DEFAULT_ANALYSIS_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            bind_addr,
            analysis_url,
            picker: PickerConfig::default(),
        })
    }
}
