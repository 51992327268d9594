//! Concrete adapter implementations for ports.

pub mod clock_adapter;
pub mod file_config_adapter;
pub mod static_catalog_adapter;
#[cfg(feature = "web")]
pub mod web;
