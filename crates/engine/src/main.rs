//! Frame Survivor Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frame_survivor_engine::api::{self, FrameResponder};
use frame_survivor_engine::app::{App, AppOptions, AppPorts};
use frame_survivor_engine::infrastructure::{
    clock::{SystemClock, SystemRandom},
    combat::StatCombatResolver,
    config::{EngineConfig, SessionStoreKind},
    memory_store::InMemorySessionRepo,
    ports::{CharacterProvider, ClockPort, RandomPort, SessionRepo},
    renderer::{load_draw_card, CardBackgrounds, SvgFrameRenderer},
    session_store::SqliteSessionRepo,
    sloot::{ResilientCharacterProvider, RetryConfig, SeededSlootProvider, SlootApiClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    let config = EngineConfig::from_env()?;

    // Initialize logging; the guard flushes the file writer on exit.
    let _log_guard = init_tracing(&config);

    tracing::info!("Starting Frame Survivor Engine");

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());

    // Session store
    let sessions: Arc<dyn SessionRepo> = match config.session_store {
        SessionStoreKind::Sqlite => {
            tracing::info!(path = %config.session_db, "Using SQLite session store");
            Arc::new(SqliteSessionRepo::new(&config.session_db, clock.clone()).await?)
        }
        SessionStoreKind::Memory => {
            tracing::warn!("Using in-memory session store; sessions are lost on restart");
            Arc::new(InMemorySessionRepo::new())
        }
    };

    // Sloot provider
    let provider: Arc<dyn CharacterProvider> = match &config.sloot_api_url {
        Some(url) => {
            let retry_config = RetryConfig {
                max_retries: config.provider_max_retries,
                ..RetryConfig::default()
            };
            tracing::info!(
                url = %url,
                max_retries = retry_config.max_retries,
                base_delay_ms = retry_config.base_delay_ms,
                "Sloot API client configured with retry"
            );
            let client = Arc::new(SlootApiClient::new(
                url.as_str(),
                config.upstream_timeout,
                random.clone(),
            ));
            Arc::new(ResilientCharacterProvider::new(client, retry_config))
        }
        None => {
            tracing::info!("SLOOT_API_URL not set, deriving sloot locally");
            Arc::new(SeededSlootProvider::new(random.clone()))
        }
    };

    // Renderer and assets
    let backgrounds = CardBackgrounds::load(&config.asset_dir).await;
    let draw_card = load_draw_card(&config.asset_dir).await;

    let app = Arc::new(App::new(
        AppPorts {
            sessions,
            provider,
            resolver: Arc::new(StatCombatResolver::new(random)),
            renderer: Arc::new(SvgFrameRenderer::new(backgrounds)),
            clock,
        },
        AppOptions {
            upstream_timeout: config.upstream_timeout,
            display_utc_offset_hours: config.display_utc_offset_hours,
            draw_card,
        },
        FrameResponder::from_config(&config),
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    tracing::info!(public_base_url = %config.public_base_url, "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(config: &EngineConfig) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "frame_survivor_engine=debug,tower_http=debug".into());

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "frame-survivor.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    // Frame clients only GET images and POST actions.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        return Some(cors.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(cors.allow_origin(origins))
}
