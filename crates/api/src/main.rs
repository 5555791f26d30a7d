use std::net::SocketAddr;
use std::sync::Arc;

use bitlings_api::config::ServerConfig;
use bitlings_api::router::build_app_router;
use bitlings_api::state::AppState;
use bitlings_db::MemoryStore;
use bitlings_generator::{DisabledGenerator, Generator, GeneratorConfig, OpenAiGenerator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bitlings_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let rules = config.game_rules();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        approval_threshold = rules.approval_threshold,
        admin_enabled = config.admin_token.is_some(),
        "Loaded server configuration",
    );

    // --- Store ---
    let store = Arc::new(MemoryStore::new());
    if config.seed_demo_data {
        let seeded = store.load_demo(&config.default_user_id, &rules).await;
        tracing::info!(seeded, "Demo data loaded");
    }

    // --- Generator ---
    let generator: Arc<dyn Generator> = match GeneratorConfig::from_env() {
        Some(generator_config) => {
            tracing::info!(
                api_url = %generator_config.api_url,
                chat_model = %generator_config.chat_model,
                "Generator enabled",
            );
            Arc::new(
                OpenAiGenerator::new(generator_config)
                    .expect("Failed to build generator HTTP client"),
            )
        }
        None => {
            tracing::warn!("LLM_API_KEY not set, generation endpoints are disabled");
            Arc::new(DisabledGenerator)
        }
    };

    // --- App state ---
    let state = AppState {
        store,
        generator,
        config: Arc::new(config.clone()),
        rules: Arc::new(rules),
    };

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

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
