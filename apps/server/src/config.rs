//! Server configuration
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. An optional `config.yaml` / `config.toml` in the working directory, or the
//!    file named by `--config` / `AYUSH_CONFIG`
//! 3. Environment variables prefixed with `AYUSH__`, nested with `__`
//!    (`AYUSH__SERVER__PORT=9000`, `AYUSH__MAPPING__SYNTHETIC_IDS=content-addressed`)
//!
//! A `.env` file is read into the environment before any of the above.

use ayush_terminology::{BuilderOptions, EngineOptions, SyntheticIds};
use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "AYUSH_CONFIG";

const ROTATIONS: [&str; 4] = ["daily", "hourly", "minutely", "never"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
    /// Identity of generated CodeSystem / ConceptMap resources
    pub fhir: BuilderOptions,
    pub mapping: MappingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty disables CORS headers
    pub cors_origins: Vec<String>,
    pub max_request_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
            max_request_body_size: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter level when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// One of `daily`, `hourly`, `minutely`, `never`
    pub file_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "ayush-server".to_string(),
            file_rotation: "daily".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog fixture; the built-in hierarchy is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub synthetic_ids: SyntheticIds,
}

impl Config {
    /// Load from the default sources, honouring `AYUSH_CONFIG`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load with an explicit config file, which must then exist
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let file = match &explicit {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::with_name("config").required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("AYUSH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        if self.server.host.trim().is_empty() {
            return Err("server.host must not be empty".to_string());
        }
        if self.logging.level.trim().is_empty() {
            return Err("logging.level must not be empty".to_string());
        }
        if !ROTATIONS.contains(&self.logging.file_rotation.as_str()) {
            return Err(format!(
                "logging.file_rotation must be one of {}, got '{}'",
                ROTATIONS.join(", "),
                self.logging.file_rotation
            ));
        }

        let ids = [
            ("fhir.code_system_id", &self.fhir.code_system_id),
            ("fhir.concept_map_id", &self.fhir.concept_map_id),
        ];
        for (key, id) in ids {
            if id.as_deref().is_some_and(|id| id.trim().is_empty()) {
                return Err(format!("{key} must not be empty when set"));
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> std::io::Result<SocketAddr> {
        (self.server.host.as_str(), self.server.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    format!("no address for {}:{}", self.server.host, self.server.port),
                )
            })
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            builder: self.fhir.clone(),
            synthetic_ids: self.mapping.synthetic_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.fhir.code_system_id.as_deref(), Some("namaste"));
        assert_eq!(config.mapping.synthetic_ids, SyntheticIds::Positional);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().unwrap_err().contains("port"));

        let mut config = Config::default();
        config.logging.file_rotation = "weekly".to_string();
        assert!(config.validate().unwrap_err().contains("weekly"));

        let mut config = Config::default();
        config.logging.level = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.fhir.concept_map_id = Some(String::new());
        assert!(config.validate().unwrap_err().contains("concept_map_id"));
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "server": { "port": 9000 },
            "mapping": { "synthetic_ids": "content-addressed" }
        }))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.engine_options().synthetic_ids,
            SyntheticIds::ContentAddressed
        );
    }

    #[test]
    fn socket_addr_resolves_host_and_port() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 3000;
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
    }
}
