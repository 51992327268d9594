//! Port traits between the domain and its collaborators.

pub mod catalog_port;
pub mod clock_port;
pub mod config_port;
