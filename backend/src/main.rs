//! Docket entry-point: loads configuration, prepares the counter store, and
//! serves the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use docket::config::AppSettings;
use docket::inbound::http::health::HealthState;
use docket::inbound::http::session_config::{BuildMode, session_settings_from_env};
use docket::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, settings.bind_addr())
        .with_counter_max_attempts(settings.counter_max_attempts());
    if let Some(pool_config) = settings.pool_config() {
        run_pending_migrations(pool_config.database_url())
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let (host, port) = settings.bind_addr();
    info!(%host, port, "starting docket server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
