//! Configuration for the calculation engine and its resolver.
//!
//! The embedding layer hands us a TOML document; the resolver's own
//! parameters pass through as an opaque table that the resolver crate
//! validates itself.

use serde_derive::Deserialize;
use sunline_api::{zone, Error, Result};
use tracing::Level;

#[derive(Deserialize, Default)]
pub struct Config {
    log_level: Option<String>,
    pub resolver: Option<zone::SourceConfig>,
}

impl Config {
    pub fn get_log_level(&self) -> Level {
        let v = self.log_level.as_deref().unwrap_or("warn");

        match v {
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::WARN,
        }
    }

    /// The resolver's parameter table; empty when the config didn't
    /// mention one, which leaves the resolver on its defaults.

    pub fn get_resolver(&self) -> zone::SourceConfig {
        self.resolver.clone().unwrap_or_default()
    }
}

pub fn parse(contents: &str) -> Result<Config> {
    toml::from_str(contents)
        .map_err(|e| Error::ConfigError(format!("{}", e)))
}

pub async fn from_file(path: &str) -> Result<Config> {
    use tokio::fs;

    match fs::read(path).await {
        Ok(contents) => parse(&String::from_utf8_lossy(&contents)),
        Err(e) => Err(Error::ConfigError(format!(
            "couldn't read {} -- {}",
            path, e
        ))),
    }
}

/// Initializes the log system with the configured level. Opt-in, for
/// embedders that don't install a subscriber of their own; call it at
/// most once per process.

pub fn init_logging(cfg: &Config) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(cfg.get_log_level())
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Unable to set global default subscriber");
}
