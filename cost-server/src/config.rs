use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cost_core::db::DbConfig;

/// Recipe costing server: item catalog plus a calculation sheet over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "cost-server", version, about)]
pub struct Config {
    /// Storage backend (`json` or `sqlite`).
    #[arg(long, env = "COST_DB_BACKEND", default_value = "json")]
    pub backend: String,

    /// Catalog location. For `json` a file path; for `sqlite` a file path or
    /// `:memory:`.
    #[arg(long, env = "COST_DB", default_value = "data.json")]
    pub db: String,

    /// Address to listen on.
    #[arg(long, env = "COST_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Directory of presentation files served for every non-API path.
    #[arg(long, env = "COST_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Largest accepted request body, in bytes.
    #[arg(long, env = "COST_MAX_BODY_BYTES", default_value_t = 1_000_000)]
    pub max_body_bytes: usize,

    /// Also append log output to this file.
    #[arg(long, env = "COST_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.backend.clone(),
            connection_string: self.db.clone(),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
