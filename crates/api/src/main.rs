use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storygen_api::config::ServerConfig;
use storygen_api::router::build_app_router;
use storygen_api::state::AppState;
use storygen_core::secrets::{load_credential, SecretStore};
use storygen_gemini::{GeminiGenerator, StoryGenerator};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storygen_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        model = %config.gemini_model,
        "Loaded server configuration"
    );

    // --- Credential (fail fast; the key itself is never logged) ---
    let credential = match SecretStore::from_file(&config.secrets_file)
        .and_then(|store| load_credential(&store, &config.api_key_path))
    {
        Ok(credential) => credential,
        Err(err) => {
            tracing::error!(error = %err, "Cannot start without an API credential");
            std::process::exit(1);
        }
    };
    tracing::info!(path = %config.api_key_path, "API credential loaded");

    // --- Generation client ---
    let generator: Arc<dyn StoryGenerator> =
        Arc::new(GeminiGenerator::new(config.gemini(), credential));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        generator,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
