//! Rotarc Core - Shared configuration, constants, errors, and reports

pub mod config;
pub mod constants;
pub mod error;
pub mod report;

pub use config::*;
pub use constants::*;
pub use error::{Error, Result};
pub use report::*;
