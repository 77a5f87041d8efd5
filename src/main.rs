//! Bookings server
//!
//! # Usage
//!
//! ```bash
//! BOOKINGS__DATABASE__URL=postgres://localhost/bookings cargo run
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use bookings::adapters::http::middleware::{CookieSettings, CookieSigner, SessionLayer};
use bookings::adapters::{
    app_router, AppState, InMemorySessionStore, MiniJinjaRenderer, PostgresDatabaseRepo,
    RedisSessionStore,
};
use bookings::config::{AppConfig, RedisConfig};
use bookings::ports::SessionStore;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        redis = config.redis.is_some(),
        "Configuration loaded"
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let sessions: Arc<dyn SessionStore> = match &config.redis {
        Some(redis) => Arc::new(connect_redis(redis, &config).await?),
        None => {
            tracing::warn!("No Redis configured, sessions are kept in process memory");
            let store = InMemorySessionStore::with_lifetime(config.session.lifetime());
            spawn_session_purge(store.clone());
            Arc::new(store)
        }
    };

    let renderer = MiniJinjaRenderer::new()?;
    let signer = CookieSigner::new(&config.session.secret)
        .map_err(|e| format!("invalid session secret: {e}"))?;
    let session_layer = Arc::new(SessionLayer::new(
        sessions,
        signer,
        CookieSettings {
            name: config.session.cookie_name.clone(),
            max_age_secs: config.session.lifetime_secs,
            secure: config.is_production(),
        },
    ));

    let state = AppState::new(
        Arc::new(PostgresDatabaseRepo::new(pool)),
        Arc::new(renderer),
    );
    let app = app_router(state, session_layer)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Bookings server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn connect_redis(
    redis_config: &RedisConfig,
    config: &AppConfig,
) -> Result<RedisSessionStore, Box<dyn std::error::Error>> {
    let client = redis::Client::open(redis_config.url.as_str())?;
    let conn = tokio::time::timeout(
        redis_config.timeout(),
        client.get_multiplexed_tokio_connection(),
    )
    .await??;
    tracing::info!("Sessions stored in Redis");
    Ok(RedisSessionStore::new(conn, config.session.lifetime()))
}

fn spawn_session_purge(store: InMemorySessionStore) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            store.purge_expired().await;
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
