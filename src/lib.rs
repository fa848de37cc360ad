//! Republish `smartctl` health data for every block device over HTTP.

pub mod collector;
pub mod config;
pub mod error;
pub mod server;

pub use error::{CollectorError, Result};
