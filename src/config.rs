// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first, if present.

use crate::models::Coords;
use crate::services::map::DEFAULT_ZOOM;
use std::env;
use std::path::PathBuf;

/// Where the workout collection is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file per key under `data_dir`.
    File,
    /// Process memory only; lost on exit.
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Directory for the file storage backend
    pub data_dir: PathBuf,
    pub storage_backend: StorageBackend,
    /// Zoom level for the initial view and for recentering
    pub map_zoom_level: u8,
    /// Fixed starting position. When set, the map initializes at startup
    /// instead of waiting for the browser's geolocation result.
    pub home_position: Option<Coords>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage_backend = match env::var("STORAGE_BACKEND").as_deref() {
            Err(_) | Ok("file") => StorageBackend::File,
            Ok("memory") => StorageBackend::Memory,
            Ok(other) => {
                return Err(ConfigError::Invalid("STORAGE_BACKEND", other.to_string()));
            }
        };

        let map_zoom_level = match env::var("MAP_ZOOM_LEVEL") {
            Ok(raw) => raw
                .parse::<u8>()
                .ok()
                .filter(|z| *z <= 20)
                .ok_or(ConfigError::Invalid("MAP_ZOOM_LEVEL", raw))?,
            Err(_) => DEFAULT_ZOOM,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            storage_backend,
            map_zoom_level,
            home_position: home_position_from_env()?,
        })
    }

    /// Config for tests: in-memory storage, no home position.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_dir: PathBuf::from("data"),
            storage_backend: StorageBackend::Memory,
            map_zoom_level: DEFAULT_ZOOM,
            home_position: None,
        }
    }
}

/// `HOME_LATITUDE` and `HOME_LONGITUDE` must be set together.
fn home_position_from_env() -> Result<Option<Coords>, ConfigError> {
    let parse = |name: &'static str| -> Result<Option<f64>, ConfigError> {
        match env::var(name) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ConfigError::Invalid(name, raw)),
            Err(_) => Ok(None),
        }
    };

    match (parse("HOME_LATITUDE")?, parse("HOME_LONGITUDE")?) {
        (Some(lat), Some(lng)) => {
            let coords = Coords::new(lat, lng);
            if coords.is_valid() {
                Ok(Some(coords))
            } else {
                Err(ConfigError::Invalid("HOME_LATITUDE", format!("{lat},{lng}")))
            }
        }
        (None, None) => Ok(None),
        (None, Some(_)) => Err(ConfigError::Missing("HOME_LATITUDE")),
        (Some(_), None) => Err(ConfigError::Missing("HOME_LONGITUDE")),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment is process-global; keep every env-mutating check in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("STORAGE_BACKEND");
        env::remove_var("MAP_ZOOM_LEVEL");
        env::remove_var("HOME_LATITUDE");
        env::remove_var("HOME_LONGITUDE");
        env::set_var("DATA_DIR", "/tmp/workouts");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.storage_backend, StorageBackend::File);
        assert_eq!(config.map_zoom_level, 13);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/workouts"));
        assert_eq!(config.home_position, None);

        env::set_var("STORAGE_BACKEND", "memory");
        env::set_var("MAP_ZOOM_LEVEL", "15");
        env::set_var("HOME_LATITUDE", "52.52");
        env::set_var("HOME_LONGITUDE", "13.40");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.map_zoom_level, 15);
        assert_eq!(config.home_position, Some(Coords::new(52.52, 13.40)));

        env::remove_var("HOME_LONGITUDE");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("HOME_LONGITUDE"))
        ));

        env::remove_var("HOME_LATITUDE");
        env::set_var("STORAGE_BACKEND", "s3");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("STORAGE_BACKEND", _))
        ));

        env::remove_var("STORAGE_BACKEND");
        env::set_var("MAP_ZOOM_LEVEL", "99");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("MAP_ZOOM_LEVEL", _))
        ));
        env::remove_var("MAP_ZOOM_LEVEL");
        env::remove_var("DATA_DIR");
    }
}
