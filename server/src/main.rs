mod config;
mod frontend;
mod routes;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "pingcrm=info,tower_http=info".into()))
        .init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    let port = config.port;

    // In development this waits for the frontend dev server to publish its address.
    let vite = frontend::Vite::load(&config.frontend).await.expect("frontend assets unavailable");

    let state = state::AppState::new(config, vite);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await.expect("failed to bind");

    let address = listener.local_addr().expect("listener address");
    tracing::info!(%address, "⚡ PingCRM started on http://{address}");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await.expect("server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
