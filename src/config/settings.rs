use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    /// Transport backend: "simulated" or "log"
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Upper bound on one transport attempt; a timed-out attempt leaves
    /// the record pending
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Simulated transport latency
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Simulated transport failure rate (0.0..=1.0)
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Records returned by a history query when no limit is given
    #[serde(default = "default_query_limit")]
    pub default_query_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_backend() -> String {
    "simulated".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_latency_ms() -> u64 {
    150
}

fn default_failure_rate() -> f64 {
    0.1
}

fn default_query_limit() -> usize {
    50
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8082)?
            .set_default("transport.backend", "simulated")?
            .set_default("transport.timeout_ms", 5000)?
            .set_default("transport.latency_ms", 150)?
            .set_default("transport.failure_rate", 0.1)?
            .set_default("history.default_query_limit", 50)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // SERVER_HOST, SERVER_PORT, TRANSPORT_BACKEND, etc.
            .add_source(
                Environment::default()
                    .separator("_")
                    .try_parsing(true)
                    .list_separator(","),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            transport: TransportConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            timeout_ms: default_timeout_ms(),
            latency_ms: default_latency_ms(),
            failure_rate: default_failure_rate(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_query_limit: default_query_limit(),
        }
    }
}
