//! Backend entry-point: loads configuration, prepares storage and the
//! generation client, then serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use carelink::domain::ports::{GenerationClient, UnconfiguredGenerationClient};
use carelink::inbound::http::health::HealthState;
use carelink::inbound::http::session_config::{BuildMode, session_settings_from_env};
use carelink::outbound::generation::{GeminiConfig, GeminiHttpClient};
use carelink::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use carelink::settings::AppSettings;
use server::{ServerConfig, create_server, seed_demo_doctors};

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
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_generation_client(build_generation_client(&settings)?);

    let config = match settings.database_url.as_deref() {
        Some(database_url) => {
            run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .map_err(|err| std::io::Error::other(err.into_message()))?;
            info!("using PostgreSQL storage");
            config.with_db_pool(pool)
        }
        None => {
            warn!("no database configured; accounts and messages are kept in memory");
            config
        }
    };

    if settings.seed_demo_doctors {
        match settings.demo_doctor_password() {
            Some(password) => {
                seed_demo_doctors(&config, password)
                    .await
                    .map_err(|err| std::io::Error::other(err.message().to_owned()))?;
            }
            None => warn!(
                reason = "missing password",
                "demo doctor seeding enabled but CARELINK_DEMO_DOCTOR_PASSWORD is unset; skipping"
            ),
        }
    }

    info!(bind_addr = %config.bind_addr(), "starting HTTP server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

fn build_generation_client(settings: &AppSettings) -> std::io::Result<Arc<dyn GenerationClient>> {
    let Some(api_key) = settings
        .generation_api_key()
        .map_err(std::io::Error::other)?
    else {
        warn!("generation API key not configured; fitness and medication requests will degrade");
        return Ok(Arc::new(UnconfiguredGenerationClient));
    };
    let client = GeminiHttpClient::new(GeminiConfig {
        endpoint: settings.generation_endpoint().to_owned(),
        model: settings.generation_model().to_owned(),
        api_key,
        timeout: settings.generation_timeout(),
    })
    .map_err(std::io::Error::other)?;
    info!(url = %client.url(), "generation client configured");
    Ok(Arc::new(client))
}
