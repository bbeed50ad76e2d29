//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration loading and the composition root.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root wiring adapters into services
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
