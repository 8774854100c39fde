use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studygroup_api::config::ServerConfig;
use studygroup_api::router::build_app_router;
use studygroup_api::state::AppState;
use studygroup_events::{EventBus, GroupChangedEvent};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let pool = connect_database().await;

    let event_bus = Arc::new(EventBus::default());
    let sink = tokio::spawn(log_group_changes(event_bus.subscribe()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST is not a valid address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Cannot bind {addr}: {e}"));
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    sink.abort();
    tracing::info!("Shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studygroup_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, probe, and migrate the database, or abort startup.
async fn connect_database() -> studygroup_db::DbPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = studygroup_db::create_pool(&url)
        .await
        .expect("Cannot connect to database");
    studygroup_db::health_check(&pool)
        .await
        .expect("Database did not answer the health probe");
    studygroup_db::run_migrations(&pool)
        .await
        .expect("Migrations failed");
    tracing::info!("Database ready, migrations applied");
    pool
}

/// Log every group change.
///
/// Stands in for an external notification channel; a lagged or closed
/// receiver never affects request handling.
async fn log_group_changes(mut receiver: broadcast::Receiver<GroupChangedEvent>) {
    loop {
        match receiver.recv().await {
            Ok(event) => {
                tracing::info!(group_id = event.group_id, change = ?event.change, "Group changed");
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Change-event sink fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Resolve on SIGINT or SIGTERM, whichever arrives first.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Cannot install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Cannot install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT received, shutting down"),
        () = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
