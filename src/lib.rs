//! Location picking for mangrove monitoring reports: keeps typed coordinates,
//! the map marker and device fixes on one point, plus the small HTTP surface
//! that serves the picker's settings and relays calls to the analysis service.

pub mod config;
pub mod geolocation;
pub mod map;
pub mod net;
pub mod picker;
pub mod proxy;
pub mod report;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
