use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_PREDICTOR_URL: &str = "http://127.0.0.1:8001/predict";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid predictor_url {url}: {source}")]
    PredictorUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("invalid value for {name}: {value}")]
    Env { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_predictor_url")]
    pub predictor_url: String,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_predictor_url() -> String {
    DEFAULT_PREDICTOR_URL.to_string()
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend/dist")
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_upstream_timeout_secs() -> u64 {
    120
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            predictor_url: default_predictor_url(),
            frontend_dir: default_frontend_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    /// Reads `GATEWAY_CONFIG` (or `config/gateway.yaml` next to the workspace),
    /// then applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("GATEWAY_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => {
                let path = default_config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    log::warn!(
                        "No config file at {}, using built-in defaults",
                        path.display()
                    );
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Relative `frontend_dir` values are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&text)?;
        if config.frontend_dir.is_relative() {
            if let Some(dir) = path.parent() {
                config.frontend_dir = dir.join(&config.frontend_dir);
            }
        }
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port.trim().parse().map_err(|_| ConfigError::Env {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(url) = lookup("PREDICTOR_URL") {
            self.predictor_url = url;
        }
        if let Some(dir) = lookup("FRONTEND_DIR") {
            self.frontend_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.predictor_url).map_err(|source| ConfigError::PredictorUrl {
            url: self.predictor_url.clone(),
            source,
        })?;
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_config_path() -> PathBuf {
    match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(manifest_dir) => PathBuf::from(format!("{}/../config/gateway.yaml", manifest_dir)),
        Err(_) => PathBuf::from("config/gateway.yaml"),
    }
}
