//! Centralized configuration (environment variables + defaults).

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::str::FromStr;
use tokio::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 50051;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Run the demo-data hook before serving.
    pub seed_demo_data: bool,
    pub stream_interval: Duration,
    /// Mount the OpenAPI document and Swagger UI.
    pub api_docs_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed_demo_data: true,
            stream_interval: Duration::from_millis(100),
            api_docs_enabled: true,
        }
    }
}

impl Config {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset variables take defaults;
    /// set but unparsable ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        // LISTEN_PORT wins over the legacy GRPC_PORT name.
        let port = match lookup("LISTEN_PORT").or_else(|| lookup("GRPC_PORT")) {
            Some(v) => parse_var::<u16>("LISTEN_PORT/GRPC_PORT", &v)?,
            None => defaults.port,
        };

        let stream_interval = match lookup("STREAM_EVENT_INTERVAL_MS") {
            Some(v) => Duration::from_millis(parse_var::<u64>("STREAM_EVENT_INTERVAL_MS", &v)?),
            None => defaults.stream_interval,
        };

        Ok(Config {
            host: lookup("LISTEN_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port,
            seed_demo_data: match lookup("SEED_DEMO_DATA") {
                Some(v) => parse_bool("SEED_DEMO_DATA", &v)?,
                None => defaults.seed_demo_data,
            },
            stream_interval,
            api_docs_enabled: match lookup("API_DOCS_ENABLED") {
                Some(v) => parse_bool("API_DOCS_ENABLED", &v)?,
                None => defaults.api_docs_enabled,
            },
        })
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("Invalid {}: {:?}", name, value))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid {}: {:?} (expected true/false)", name, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 50051);
        assert_eq!(config.bind_address().unwrap().to_string(), "0.0.0.0:50051");
    }

    #[test]
    fn test_grpc_port_is_honoured_and_listen_port_wins() {
        assert_eq!(config_from(&[("GRPC_PORT", "6000")]).unwrap().port, 6000);
        let config = config_from(&[("GRPC_PORT", "6000"), ("LISTEN_PORT", "7000")]).unwrap();
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("GRPC_PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("LISTEN_PORT", "70000")]).is_err());
        assert!(config_from(&[("SEED_DEMO_DATA", "maybe")]).is_err());
        assert!(config_from(&[("STREAM_EVENT_INTERVAL_MS", "-1")]).is_err());
    }

    #[test]
    fn test_flags_and_interval() {
        let config = config_from(&[
            ("SEED_DEMO_DATA", "false"),
            ("API_DOCS_ENABLED", "0"),
            ("STREAM_EVENT_INTERVAL_MS", "5"),
            ("LISTEN_HOST", "127.0.0.1"),
        ])
        .unwrap();
        assert!(!config.seed_demo_data);
        assert!(!config.api_docs_enabled);
        assert_eq!(config.stream_interval, Duration::from_millis(5));
        assert_eq!(config.bind_address().unwrap().to_string(), "127.0.0.1:50051");
    }
}
