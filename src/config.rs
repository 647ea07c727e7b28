use std::env;
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: Option<String>,
    pub api_base: Option<String>,
}

impl Config {
    /// Reads settings from the process environment, after folding in a `.env` file if one exists.
    pub fn load() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                warn!("failed to read .env file: {err}");
            }
        }

        Self {
            port: load_port(),
            database_url: non_empty("DATABASE_URL"),
            api_base: non_empty("API_BASE"),
        }
    }
}

fn load_port() -> u16 {
    match env::var("PORT") {
        Ok(value) => value.parse().unwrap_or_else(|err| {
            warn!("invalid PORT value {value:?}: {err}, using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    }
}

fn non_empty(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => {
            info!("{key} not set");
            None
        }
    }
}
