//! Configuration Management Module for midoctl
//!
//! The web server's configuration lives in a single JSON object shared by
//! every Mido's House service. midoctl reads it once at startup and threads
//! it through as an explicit parameter; nothing in the crate touches the
//! config as ambient state.
//!
//! # Configuration Structure
//!
//! The configuration is stored in JSON format at `/etc/xdg/midos-house.json`
//! with camelCase field names. midoctl only consumes the fields it needs:
//! - `ootrApiKey` - API key for the ootrandomizer.com v2 endpoints
//!
//! # Error Handling
//!
//! Loading distinguishes a missing file (`ConfigError::Missing`) from an
//! unreadable or malformed one, so the operator message can say which.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::errors::{ConfigError, Result};

/// Location of the shared Mido's House configuration file.
pub const CONFIG_PATH: &str = "/etc/xdg/midos-house.json";

/// The subset of the shared configuration consumed by midoctl.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// API key for ootrandomizer.com seed details and unlock requests.
    pub ootr_api_key: String,
}

impl Config {
    /// Loads the configuration from its fixed system path.
    ///
    /// # Errors
    /// * If the configuration file is missing, unreadable, or not valid JSON.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    /// Loads the configuration from a custom path.
    ///
    /// # Arguments
    /// * `path` - The configuration file to read
    ///
    /// # Errors
    /// * If the configuration file is missing, unreadable, or not valid JSON.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::Missing {
                path: PathBuf::from(path),
            }
            .into());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config = serde_json::from_str(&contents).map_err(ConfigError::Json)?;

        Ok(config)
    }
}
