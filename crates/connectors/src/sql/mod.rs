pub mod adapter;
pub mod dialect;
pub mod encoder;
pub mod error;
pub mod loader;
pub mod metadata;
pub mod mysql;
