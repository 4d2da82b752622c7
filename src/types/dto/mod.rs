pub mod picker_config;
pub mod upload;
