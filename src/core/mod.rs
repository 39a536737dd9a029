//! Core library components.

pub mod domain;
pub mod service;
