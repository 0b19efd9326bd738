//! # ACNH Common Library
//!
//! Shared code for the ACNH catalog crates:
//! - Error types
//! - Client configuration loading and validation

pub mod config;
pub mod error;

pub use config::ClientConfig;
pub use error::{Error, Result};
