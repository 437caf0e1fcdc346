pub mod app_config;
pub mod config;
pub mod marketplaces;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use marketplaces::{load_marketplaces, Marketplace, MarketplacesFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read marketplaces file {path}: {source}")]
    MarketplacesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse marketplaces file: {0}")]
    MarketplacesFileParse(#[from] serde_yaml::Error),

    #[error("invalid marketplace configuration: {0}")]
    Validation(String),
}
