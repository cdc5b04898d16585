use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "your-secret-key";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub redis_url: Option<String>,
    pub jwt_secret: String,
    pub seed_key: String,
    pub demo_username: String,
    pub demo_password: String,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("RUST_PORT", "1111")?,
            redis_url: var("REDIS_URL").ok(),
            jwt_secret: env_or_secret("JWT_SECRET").unwrap_or_else(|| {
                warn!("JWT_SECRET not configured, signing tokens with the default key");
                DEFAULT_JWT_SECRET.to_string()
            }),
            seed_key: env_or_secret("SEED_KEY").unwrap_or_else(|| "seed-key-123".to_string()),
            demo_username: try_load("DEMO_USERNAME", "admin")?,
            demo_password: try_load("DEMO_PASSWORD", "123456")?,
            static_dir: var("STATIC_DIR").ok().map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 1111,
            redis_url: None,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            seed_key: "seed-key-123".to_string(),
            demo_username: "admin".to_string(),
            demo_password: "123456".to_string(),
            static_dir: None,
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("Environment variable {key} not found");
    })
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");

            ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }
        })
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            info!("Failed to read {secret_name} from file: {e}");
        })
        .ok()
        .filter(|s| !s.is_empty())
}

fn env_or_secret(key: &str) -> Option<String> {
    var(key).ok().or_else(|| read_secret(key))
}
