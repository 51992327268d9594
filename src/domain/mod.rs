//! Core domain types and logic.

pub mod stock;
pub mod trade;
pub mod ledger;
pub mod metrics;
pub mod index;
pub mod market;
pub mod config_validation;
pub mod error;
