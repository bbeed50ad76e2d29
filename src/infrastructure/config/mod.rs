//! Infrastructure configuration modules.

pub mod data;
pub mod logging;
pub mod mining;
pub mod settings;
