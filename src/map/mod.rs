pub mod library;
pub mod loader;
pub mod session;
