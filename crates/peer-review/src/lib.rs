pub mod config;
pub mod document;
pub mod error;
pub mod form;
pub mod render;
pub mod telemetry;
