use std::sync::Arc;

use color_eyre::eyre::Result;
use daybook_adapters::{
    AppSettings, Argon2Hasher, GoogleProvider, HashMapUserStore, HashMapRevokedSessionStore,
    PostgresUserStore, RedisRevokedSessionStore, SessionScheme,
};
use daybook_core::{RevokedSessionStore, UserStore};
use daybook_service::{
    AppService,
    helpers::{configure_postgresql, configure_redis},
    telemetry::init_tracing,
};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = AppSettings::load()?;

    match (&settings.database.url, &settings.redis.host_name) {
        (Some(url), Some(host)) => {
            let pool = configure_postgresql(url.expose_secret()).await?;
            let conn = Arc::new(RwLock::new(configure_redis(host)?));
            serve(
                settings.clone(),
                PostgresUserStore::new(pool),
                RedisRevokedSessionStore::new(conn),
            )
            .await
        }
        (Some(url), None) => {
            let pool = configure_postgresql(url.expose_secret()).await?;
            serve(
                settings.clone(),
                PostgresUserStore::new(pool),
                HashMapRevokedSessionStore::new(),
            )
            .await
        }
        (None, Some(host)) => {
            let conn = Arc::new(RwLock::new(configure_redis(host)?));
            serve(
                settings.clone(),
                HashMapUserStore::new(),
                RedisRevokedSessionStore::new(conn),
            )
            .await
        }
        (None, None) => {
            tracing::warn!("no database or redis configured, state is kept in memory");
            serve(
                settings.clone(),
                HashMapUserStore::new(),
                HashMapRevokedSessionStore::new(),
            )
            .await
        }
    }
}

async fn serve<U, B>(settings: AppSettings, user_store: U, revoked_sessions: B) -> Result<()>
where
    U: UserStore + Clone + 'static,
    B: RevokedSessionStore + Clone + 'static,
{
    let mut scheme = SessionScheme::new(
        user_store,
        Argon2Hasher::default(),
        revoked_sessions,
        settings.session_config(),
    );

    match settings.google_config() {
        Some(google) => {
            tracing::info!("google signin enabled");
            scheme = scheme.with_provider(GoogleProvider::new(google, reqwest::Client::new()));
        }
        None => tracing::info!("google signin disabled, client id or secret missing"),
    }

    let listener = tokio::net::TcpListener::bind(&settings.application.address).await?;

    AppService::new(scheme)
        .run_standalone(listener, Some(settings.application.allowed_origins))
        .await?;

    Ok(())
}
