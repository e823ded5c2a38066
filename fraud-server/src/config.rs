//! Configuration module

use std::env;
use std::path::PathBuf;

use fraud_core::constants;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Interface to bind
    pub bind_addr: String,

    /// Model artifact read once at startup
    pub model_path: PathBuf,

    /// The only origin allowed to call `/predict` from a browser
    pub cors_origin: String,

    /// Environment (development, production)
    pub environment: String,

    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5050,
            bind_addr: "0.0.0.0".to_string(),
            model_path: PathBuf::from(constants::DEFAULT_MODEL_PATH),
            cors_origin: "http://localhost:8000".to_string(),
            environment: "development".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),

            model_path: constants::get_model_path(),

            cors_origin: env::var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),

            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.log_json),
        }
    }

    /// `bind_addr:port`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
