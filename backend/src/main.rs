//! Backend entry-point: loads configuration, wires adapters into the domain
//! services, and serves the REST API.

use std::sync::Arc;

use color_eyre::eyre::{Context, Result};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use notevault::outbound::hashing::BcryptPasswordHasher;
use notevault::outbound::memory::MemoryStore;
use notevault::server::{build_http_state, create_server};
use notevault::settings::ServerSettings;

fn init_tracing(json_logs: bool) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = if json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = ServerSettings::load().wrap_err("failed to load configuration")?;
    init_tracing(settings.json_logs);

    let bind_addr = settings
        .bind_addr()
        .wrap_err("invalid NOTEVAULT_BIND_ADDR")?;
    let hasher = BcryptPasswordHasher::new(settings.bcrypt_cost())
        .wrap_err("invalid NOTEVAULT_BCRYPT_COST")?;

    let store = MemoryStore::new();
    let http_state = build_http_state(&store, hasher, Arc::new(DefaultClock));

    info!(bcrypt_cost = hasher.cost(), "starting notevault");
    create_server(bind_addr, http_state)
        .wrap_err("failed to bind HTTP listener")?
        .await
        .wrap_err("HTTP server terminated")
}
