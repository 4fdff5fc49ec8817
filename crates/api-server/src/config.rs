use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use metric_extractor::NumeralPolicy;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024; // 10 MB

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub numeral_policy: NumeralPolicy,
    /// Optional JSON file overriding the keyword tables.
    pub vocabulary_path: Option<PathBuf>,
    /// `["*"]` allows any origin.
    pub cors_allowed_origins: Vec<String>,
    pub enable_hsts: bool,
}

/// `true`/`1` or `false`/`0`, case-insensitive.
fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => anyhow::bail!("expected true, false, 1 or 0, got '{other}'"),
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            numeral_policy: NumeralPolicy::StrictInteger,
            vocabulary_path: None,
            cors_allowed_origins: vec!["*".to_string()],
            enable_hsts: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let config = Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: match var("PORT") {
                Some(v) => v
                    .parse()
                    .with_context(|| format!("PORT must be a port number, got '{v}'"))?,
                None => defaults.port,
            },
            max_upload_bytes: match var("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse()
                    .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{v}'"))?,
                None => defaults.max_upload_bytes,
            },
            numeral_policy: match var("NUMERAL_POLICY") {
                Some(v) => v.parse().context("Invalid NUMERAL_POLICY")?,
                None => defaults.numeral_policy,
            },
            vocabulary_path: var("VOCABULARY_PATH").map(PathBuf::from),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_allowed_origins),
            enable_hsts: match var("ENABLE_HSTS") {
                Some(v) => parse_flag(&v).context("Invalid ENABLE_HSTS")?,
                None => defaults.enable_hsts,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_upload_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_BYTES must be greater than zero");
        }
        if self.cors_allowed_origins.is_empty() {
            anyhow::bail!("CORS_ALLOWED_ORIGINS must list at least one origin");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.numeral_policy, NumeralPolicy::StrictInteger);
        assert!(config.allows_any_origin());
        assert!(!config.enable_hsts);
        assert_eq!(config.socket_addr().unwrap().port(), 8000);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9100"),
            ("MAX_UPLOAD_BYTES", "2048"),
            ("NUMERAL_POLICY", "decimal"),
            ("VOCABULARY_PATH", "/etc/vocab.json"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example"),
            ("ENABLE_HSTS", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9100");
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.numeral_policy, NumeralPolicy::Decimal);
        assert_eq!(config.vocabulary_path, Some(PathBuf::from("/etc/vocab.json")));
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(!config.allows_any_origin());
        assert!(config.enable_hsts);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("MAX_UPLOAD_BYTES", "0")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("NUMERAL_POLICY", "fuzzy")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", " , ")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("ENABLE_HSTS", "yes")])).is_err());
    }

    #[test]
    fn test_hsts_flag_values() {
        let hsts = |v: &str| {
            ServerConfig::from_lookup(lookup(&[("ENABLE_HSTS", v)]))
                .unwrap()
                .enable_hsts
        };
        assert!(hsts("true"));
        assert!(hsts("1"));
        assert!(!hsts("FALSE"));
        assert!(!hsts("0"));
    }
}
