//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;

/// Default map zoom when focusing a workout.
pub const DEFAULT_MAP_ZOOM_LEVEL: u8 = 13;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Directory holding the durable workout slot
    pub data_dir: PathBuf,
    /// Zoom level used when the map moves to a workout
    pub map_zoom_level: u8,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            map_zoom_level: DEFAULT_MAP_ZOOM_LEVEL,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            map_zoom_level: match env::var("MAP_ZOOM_LEVEL") {
                Ok(raw) => parse_zoom_level(&raw)?,
                Err(_) => DEFAULT_MAP_ZOOM_LEVEL,
            },
        })
    }
}

/// Leaflet-style zoom levels run from 1 (world) to 20 (street).
fn parse_zoom_level(raw: &str) -> Result<u8, ConfigError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|z| (1..=20).contains(z))
        .ok_or(ConfigError::Invalid("MAP_ZOOM_LEVEL"))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
