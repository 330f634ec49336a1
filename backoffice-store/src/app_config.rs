use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    pub invoice: InvoiceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    3
}

/// Static asset locations. The invoice logo used to be a hard-coded
/// absolute path; it is configuration now and may be absent entirely.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AssetsConfig {
    pub logo_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InvoiceConfig {
    pub company_name: String,
    /// Remit-to mailing address, one entry per printed line
    pub remit_to: Vec<String>,
    /// "render" draws an empty table with a 0.00 total for orders without
    /// line items; "skip" leaves them out of the export and reports them.
    #[serde(default = "default_empty_orders")]
    pub empty_orders: String,
}

fn default_empty_orders() -> String {
    "render".to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file; optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of BACKOFFICE)
            // Eg. `BACKOFFICE__SERVER__PORT=9000` would set the port
            .add_source(config::Environment::with_prefix("BACKOFFICE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
