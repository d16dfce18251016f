//! Data service configuration.

use std::path::PathBuf;

use common::env_or;

/// Default location of the JSON document
pub const DEFAULT_DATABASE_PATH: &str = "database.json";

/// Data service configuration.
#[derive(Debug, Clone)]
pub struct DataServiceConfig {
    /// Path of the JSON document on disk
    pub database_path: PathBuf,
}

impl DataServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database_path: PathBuf::from(env_or(&["DATABASE_PATH"], DEFAULT_DATABASE_PATH)),
        }
    }
}

impl Default for DataServiceConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}
