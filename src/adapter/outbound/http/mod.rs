//! HTTP adapter for the strategy backend.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::{HttpBackend, CSRF_HEADER};
pub use settings::ApiConfig;
