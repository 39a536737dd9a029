//! Infrastructure configuration modules.

pub mod execution;
pub mod logging;
pub mod settings;
