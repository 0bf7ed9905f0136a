//! Configuration management for the route advisor.
//!
//! Configuration is read from environment variables (a `.env` file is loaded
//! first by the binary, if present):
//! - `GOOGLE_API_KEY` - Gemini API key. Not validated at startup.
//! - `MODEL_NAME` - Optional. Gemini model identifier. Defaults to `gemini-1.5-flash`.
//! - `WEATHER_API_KEY` - OpenWeatherMap API key.
//! - `GOOGLE_MAPS_API_KEY` - Google Directions API key.
//! - `TOMTOM_API_KEY` - TomTom traffic API key.
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Defaults to `8001`.
//! - `MAX_ITERATIONS` - Optional. Agent loop step budget. Defaults to `15`.
//! - `CORS_ORIGINS` - Optional. Comma separated allowed origins. Defaults to `http://localhost:3000`.
//! - `HOME_CITY`, `HOME_LAT`, `HOME_LON` - Optional. Fixed origin used by the
//!   traffic and directions tools. Defaults to Sousse.
//! - `GEMINI_BASE_URL`, `WEATHER_BASE_URL`, `TOMTOM_BASE_URL`, `MAPS_BASE_URL` -
//!   Optional. Provider endpoint overrides.

use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TOMTOM_BASE_URL: &str = "https://api.tomtom.com";
pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Credentials and endpoints of the third-party lookup providers.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    /// OpenWeatherMap API key
    pub weather_api_key: String,

    /// TomTom traffic API key
    pub traffic_api_key: String,

    /// Google Maps (Directions) API key
    pub maps_api_key: String,

    pub weather_base_url: String,
    pub traffic_base_url: String,
    pub maps_base_url: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            weather_api_key: String::new(),
            traffic_api_key: String::new(),
            maps_api_key: String::new(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            traffic_base_url: DEFAULT_TOMTOM_BASE_URL.to_string(),
            maps_base_url: DEFAULT_MAPS_BASE_URL.to_string(),
        }
    }
}

/// The fixed point the traffic and directions tools are anchored to.
#[derive(Debug, Clone)]
pub struct HomeConfig {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            city: "Sousse".to_string(),
            lat: 35.8256,
            lon: 10.6084,
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key
    pub google_api_key: String,

    /// Gemini model identifier
    pub model_name: String,

    /// Gemini API base URL
    pub gemini_base_url: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,

    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,

    pub home: HomeConfig,

    pub providers: ProvidersConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing API keys are not an error: they are reported as warnings and
    /// surface later as upstream authentication failures.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric setting does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let google_api_key = env_or_empty("GOOGLE_API_KEY");

        let model_name =
            std::env::var("MODEL_NAME").unwrap_or_else(|_| "gemini-1.5-flash".to_string());

        let gemini_base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_env("PORT", 8001)?;
        let max_iterations = parse_env("MAX_ITERATIONS", 15)?;

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|v| split_origins(&v))
            .unwrap_or_else(|_| vec!["http://localhost:3000".to_string()]);

        let defaults = HomeConfig::default();
        let home = HomeConfig {
            city: std::env::var("HOME_CITY").unwrap_or(defaults.city),
            lat: parse_env("HOME_LAT", defaults.lat)?,
            lon: parse_env("HOME_LON", defaults.lon)?,
        };

        let providers = ProvidersConfig {
            weather_api_key: env_or_empty("WEATHER_API_KEY"),
            traffic_api_key: env_or_empty("TOMTOM_API_KEY"),
            maps_api_key: env_or_empty("GOOGLE_MAPS_API_KEY"),
            weather_base_url: std::env::var("WEATHER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_WEATHER_BASE_URL.to_string()),
            traffic_base_url: std::env::var("TOMTOM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TOMTOM_BASE_URL.to_string()),
            maps_base_url: std::env::var("MAPS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_MAPS_BASE_URL.to_string()),
        };

        Ok(Self {
            google_api_key,
            model_name,
            gemini_base_url,
            host,
            port,
            max_iterations,
            cors_origins,
            home,
            providers,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(google_api_key: String, model_name: String) -> Self {
        Self {
            google_api_key,
            model_name,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 8001,
            max_iterations: 15,
            cors_origins: vec!["http://localhost:3000".to_string()],
            home: HomeConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }

    /// Names of the API key variables that are currently empty.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            ("GOOGLE_API_KEY", &self.google_api_key),
            ("WEATHER_API_KEY", &self.providers.weather_api_key),
            ("TOMTOM_API_KEY", &self.providers.traffic_api_key),
            ("GOOGLE_MAPS_API_KEY", &self.providers.maps_api_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

fn parse_env<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
