//! Command-line and environment configuration.
//!
//! ```bash
//! mini-http-server --port 8080 --static-dir ./public --workers 8
//! HTTP_PORT=8080 STATIC_DIR=./public mini-http-server
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 35000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("workers must be greater than zero")]
    NoWorkers,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "mini-http-server")]
#[command(about = "Serves static files and a handful of dynamic routes over HTTP/1.1")]
#[command(version)]
pub struct Config {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "HTTP_PORT")]
    pub port: u16,

    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directory static files are served from; created if missing
    #[arg(long = "static-dir", default_value = "resources", env = "STATIC_DIR")]
    pub static_dir: PathBuf,

    /// Number of connection-handling threads
    #[arg(short, long, default_value_t = 4, env = "WORKERS")]
    pub workers: usize,

    /// Seconds to wait for a slow client before dropping it (0 waits forever)
    #[arg(long = "read-timeout", default_value_t = 5, env = "READ_TIMEOUT_SECS")]
    pub read_timeout_secs: u64,
}

impl Config {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        match self.read_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }
}
