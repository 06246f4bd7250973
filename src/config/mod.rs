use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub query: QueryConfig,
    pub documents: DocumentConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub enable_cache: bool,
    pub stale_time_secs: u64,
    /// Extra attempts for failed queries. Mutations are never retried.
    pub retry_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Fraction, e.g. 0.21 for 21%
    pub tax_rate: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides `$HOME/.config/dragofactu`
    pub config_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("DRAGOFACTU_API_URL") {
            self.api.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("API_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Query overrides
        if let Ok(v) = env::var("QUERY_CACHE_ENABLED") {
            self.query.enable_cache = v.parse().unwrap_or(self.query.enable_cache);
        }
        if let Ok(v) = env::var("QUERY_STALE_TIME_SECS") {
            self.query.stale_time_secs = v.parse().unwrap_or(self.query.stale_time_secs);
        }
        if let Ok(v) = env::var("QUERY_RETRY_ATTEMPTS") {
            self.query.retry_attempts = v.parse().unwrap_or(self.query.retry_attempts);
        }

        // Document overrides
        if let Ok(v) = env::var("DOCUMENT_TAX_RATE") {
            self.documents.tax_rate = Decimal::from_str(v.trim()).unwrap_or(self.documents.tax_rate);
        }
        if let Ok(v) = env::var("DOCUMENT_CURRENCY") {
            self.documents.currency = v;
        }

        // Storage overrides
        if let Ok(v) = env::var("DRAGOFACTU_CONFIG_DIR") {
            self.storage.config_dir = Some(PathBuf::from(v));
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8000/api/v1".to_string(),
                enable_request_logging: true,
            },
            query: QueryConfig {
                enable_cache: true,
                stale_time_secs: 5 * 60,
                retry_attempts: 1,
            },
            documents: DocumentConfig::default(),
            storage: StorageConfig { config_dir: None },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.dragofactu.example.com/api/v1".to_string(),
                enable_request_logging: true,
            },
            query: QueryConfig {
                enable_cache: true,
                stale_time_secs: 60,
                retry_attempts: 1,
            },
            documents: DocumentConfig::default(),
            storage: StorageConfig { config_dir: None },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://dragofactu.example.com/api/v1".to_string(),
                enable_request_logging: false,
            },
            query: QueryConfig {
                enable_cache: true,
                stale_time_secs: 60,
                retry_attempts: 1,
            },
            documents: DocumentConfig::default(),
            storage: StorageConfig { config_dir: None },
        }
    }

    /// Config pointed at an arbitrary backend, used by tests and embedders
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.api.base_url = base_url.into();
        config
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(21, 2),
            currency: "€".to_string(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
