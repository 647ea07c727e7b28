use greeting_combos::{router, AppState, Config, Database};
use std::net::SocketAddr;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::load();

    let database = match config.database_url.as_deref() {
        Some(url) => {
            let database = Database::from_url(url);
            let schema_db = database.clone();
            match tokio::task::spawn_blocking(move || schema_db.ensure_schema()).await? {
                Ok(()) => {}
                Err(err) => error!(
                    "schema setup failed for {}: {err}; requests will report the store error",
                    database.path().display()
                ),
            }
            Some(database)
        }
        None => {
            warn!("DATABASE_URL is not set; API requests will fail");
            None
        }
    };

    let app = router(AppState::new(database, config.api_base));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
