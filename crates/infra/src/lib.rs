//! Infrastructure layer: document stores and configuration.

pub mod config;
pub mod store;
