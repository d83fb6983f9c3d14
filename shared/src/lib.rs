pub mod iss;

use crate::error::ConfigError;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

pub const ENV_VAR_PREFIX: &str = "ISS_TRACKER__";
pub const SETTINGS_FILE: &str = "Settings.toml";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_POSITIONS_FILE: &str = "ISS.OEM_J2K_EPH.xml";
pub const DEFAULT_SIGHTINGS_FILE: &str = "XMLsightingData_citiesINT03.xml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

/// Locations of the two source documents. The nesting inside each file is fixed;
/// only where the files live is configurable.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    pub positions_path: PathBuf,
    pub sightings_path: PathBuf,
    pub load_on_startup: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            positions_path: PathBuf::from(DEFAULT_POSITIONS_FILE),
            sightings_path: PathBuf::from(DEFAULT_SIGHTINGS_FILE),
            load_on_startup: false,
        }
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    Ok(Figment::new()
        .merge(Toml::file(SETTINGS_FILE))
        .merge(Env::prefixed(ENV_VAR_PREFIX).split("__"))
        .extract::<Config>()?)
}

pub mod error {
    use thiserror::Error;
    use tracing::dispatcher::SetGlobalDefaultError;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("failed to load configuration: {0}")]
        Figment(#[from] figment::Error),
    }

    #[derive(Debug, Error)]
    pub enum InitializationError {
        #[error(transparent)]
        Tracing(#[from] SetGlobalDefaultError),
        #[error(transparent)]
        Config(#[from] ConfigError),
        #[error("failed to bind listener on {addr}: {source}")]
        Bind {
            addr: String,
            source: std::io::Error,
        },
    }
}

pub async fn shutdown_listener() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = ?e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = ?e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(name: "signal.ctrlc.received", "received Ctrl+C signal, shutting down"),
        _ = terminate => info!(name: "signal.sigterm.received", "received SIGTERM signal, shutting down"),
    }
}
