use std::net::IpAddr;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::COMPLETIONS_API_URL;

/// Application configuration loaded from environment variables.
/// Every key has a default; the provider credential is never read from here.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub completions_url: String,
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            completions_url: COMPLETIONS_API_URL.to_string(),
            request_timeout_secs: 120,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            bind_addr: parse_or("RESPONDER_BIND_ADDR", &lookup, defaults.bind_addr)?,
            port: parse_or("PORT", &lookup, defaults.port)?,
            completions_url: lookup("COMPLETIONS_URL").unwrap_or(defaults.completions_url),
            request_timeout_secs: parse_or(
                "REQUEST_TIMEOUT_SECS",
                &lookup,
                defaults.request_timeout_secs,
            )?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1");
        assert_eq!(config.completions_url, COMPLETIONS_API_URL);
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "3000"),
            ("RESPONDER_BIND_ADDR", "0.0.0.0"),
            ("COMPLETIONS_URL", "http://localhost:9999/v1/completions"),
            ("REQUEST_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0");
        assert_eq!(config.completions_url, "http://localhost:9999/v1/completions");
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
