//! Server configuration from the command line and environment.

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://aviationweather.gov/api/data/metar";

#[derive(Parser, Debug, Clone)]
#[command(name = "metar-reader", version, about = "Plain-English METAR weather reports")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "METAR_BIND", default_value = "0.0.0.0:5555")]
    pub bind: String,

    /// Weather provider endpoint
    #[arg(long, env = "METAR_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Seconds to wait for the provider before giving up
    #[arg(long, env = "METAR_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "METAR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub api_url: String,
    pub timeout: Duration,
    pub log_level: String,
}

impl Args {
    pub fn into_config(self) -> Result<Config, String> {
        let bind = self
            .bind
            .parse::<SocketAddr>()
            .map_err(|e| format!("invalid bind address {}: {}", self.bind, e))?;

        if self.timeout_secs == 0 {
            return Err("timeout must be at least one second".to_string());
        }

        if self.api_url.trim().is_empty() {
            return Err("api url must not be empty".to_string());
        }

        Ok(Config {
            bind,
            api_url: self.api_url,
            timeout: Duration::from_secs(self.timeout_secs),
            log_level: self.log_level,
        })
    }
}
