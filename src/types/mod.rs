pub mod dto;
pub mod intensity;
pub mod position;
