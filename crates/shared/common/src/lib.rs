//! Common utilities shared across all crates.
//!
//! This crate provides:
//! - Unified error handling and its HTTP mapping
//! - Environment configuration helpers

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
