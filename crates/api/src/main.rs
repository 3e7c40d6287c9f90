use std::net::SocketAddr;
use std::sync::Arc;

use quizbank_api::bootstrap::ensure_bootstrap_admin;
use quizbank_api::config::ServerConfig;
use quizbank_api::router::build_app_router;
use quizbank_api::state::AppState;
use quizbank_db::store::{DocumentStore, MemoryStore, PgDocumentStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "quizbank_api=debug,quizbank_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoxError> {
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let store = open_store(&config).await?;

    if let Some(admin) = &config.bootstrap_admin {
        ensure_bootstrap_admin(store.as_ref(), admin).await?;
    }

    let addr = SocketAddr::new(config.host.parse()?, config.port);
    let state = AppState::new(store, config.clone());
    let app = build_app_router(state, &config);

    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// PostgreSQL when `DATABASE_URL` is set, otherwise a process-local store.
async fn open_store(config: &ServerConfig) -> Result<Arc<dyn DocumentStore>, BoxError> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set; documents are kept in memory and lost on exit");
        return Ok(Arc::new(MemoryStore::default()));
    };

    let pool = quizbank_db::create_pool(database_url).await?;
    tracing::info!("Database connection pool created");

    quizbank_db::health_check(&pool).await?;
    quizbank_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Arc::new(PgDocumentStore::new(pool)))
}

/// Resolve on SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
