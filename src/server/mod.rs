pub mod handlers;
pub mod middleware;
pub mod payload;
pub mod types;

use crate::{Result, config::Config};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::{AUTH_CONFIGURE_PATH, AppState, CHAT_PATH, HEALTH_PATH, VOICE_PATH};
use std::net::SocketAddr;
use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer};
use tracing::info;

/// Routes without any middleware.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(HEALTH_PATH, get(handlers::health))
        .route(CHAT_PATH, post(handlers::chat))
        .route(VOICE_PATH, post(handlers::voice))
        .route(AUTH_CONFIGURE_PATH, post(handlers::configure_auth))
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Wraps `router` in the body limit, panic catcher, compression, CORS,
/// security headers and request tracing, innermost first.
pub fn with_middleware(router: Router, config: &Config) -> Result<Router> {
    let router = router
        .layer(DefaultBodyLimit::max(config.server.body_limit_bytes))
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(CompressionLayer::new())
        .layer(middleware::cors_layer(&config.cors)?);

    Ok(middleware::with_security_headers(router).layer(TraceLayer::new_for_http()))
}

pub fn app(state: AppState, config: &Config) -> Result<Router> {
    with_middleware(routes(state), config)
}

pub async fn run(config: Config) -> Result<()> {
    let app_state = AppState::new(&config);
    let app = app(app_state, &config)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("🎤 Voice Agent Brain Server Started!");
    info!("🌐 Server URL: http://localhost:{}", config.server.port);
    info!("📱 Ready for: {}", config.site.website);
    info!("🕒 Started: {}", crate::clock::iso_timestamp(chrono::Utc::now()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
