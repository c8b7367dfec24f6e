//! Common types and utilities for Forgehook

pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{Error, Result};
pub use models::{Label, Timestamp, User};
