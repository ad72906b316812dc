//! Server configuration loaded via OrthoConfig.
//!
//! Every field can be set from the command line, a config file, or a
//! `DOCKET_`-prefixed environment variable.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Runtime settings for the docket server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DOCKET")]
pub struct AppSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL URL. Counters stay in memory when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Attempts per counter transaction before reporting contention.
    #[ortho_config(default = 3)]
    pub counter_max_attempts: u32,
}

impl AppSettings {
    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port,
        )
    }

    /// Pool settings when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let config = PoolConfig::new(url);
        Some(match self.db_max_connections {
            Some(max_size) => config.with_max_size(max_size),
            None => config,
        })
    }

    /// Attempts allowed per counter transaction; zero is raised to one.
    pub fn counter_max_attempts(&self) -> u32 {
        self.counter_max_attempts.max(1)
    }
}
