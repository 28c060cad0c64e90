use std::env;
use std::time::Duration;

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/fiber-hrms";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Startup settings. Every value has a default, so an empty environment
/// gives a local store on the standard port.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mongodb_uri: String,
    pub bind_address: String,
    pub connect_timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CONNECT_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(uri) = lookup("MONGODB_URI") {
            config.mongodb_uri = uri;
        }
        if let Some(address) = lookup("BIND_ADDRESS") {
            config.bind_address = address;
        }
        if let Some(raw) = lookup("CONNECT_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout(raw));
            }
            config.connect_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
