//! `dev-server`: static frontend dev server that publishes its address through
//! the bridge file.
//!
//! Run from the frontend project root; `pingcrm` (built in development mode)
//! picks the URL up from `dist/.vite-dev` and points its pages here.
//!
//! EXIT STATUS
//! ===========
//! `128 + signo` when ended by SIGINT / SIGTERM / SIGHUP, `1` when startup
//! fails or the exit cleanup (bridge file, socket) could not be completed.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use dev_bridge::{BridgeFile, DevBridge, ExitGuard, ExitHooks, ListenAddress};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5173;

#[derive(Debug, Parser)]
#[command(name = "dev-server", about = "Serve frontend assets during development and publish the address for pingcrm")]
struct Args {
    /// Directory to serve.
    #[arg(long, env = "DEV_ROOT", default_value = ".")]
    root: PathBuf,

    /// Interface to bind [default: 127.0.0.1]. Ignored with --socket.
    #[arg(long, env = "DEV_HOST")]
    host: Option<String>,

    /// Port to bind; 0 lets the OS choose [default: 5173]. Ignored with --socket.
    #[arg(long, env = "DEV_PORT")]
    port: Option<u16>,

    /// Where to publish the listening URL.
    #[arg(long, env = "DEV_BRIDGE_FILE", default_value = dev_bridge::DEFAULT_BRIDGE_PATH)]
    bridge_file: PathBuf,

    /// Listen on a Unix socket instead of TCP; takes precedence over host and
    /// port. No URL is published in this mode.
    #[cfg(unix)]
    #[arg(long, env = "DEV_SOCKET")]
    socket: Option<PathBuf>,
}

impl Args {
    fn tcp_address(&self) -> (&str, u16) {
        (self.host.as_deref().unwrap_or(DEFAULT_HOST), self.port.unwrap_or(DEFAULT_PORT))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "dev_server=info,dev_bridge=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let hooks = ExitHooks::process();
    let guard = ExitGuard::new(Arc::clone(&hooks));
    let bridge = Arc::new(DevBridge::new(BridgeFile::new(&args.bridge_file)));
    let notifier = dev_bridge::setup(&bridge, &hooks);

    let app = Router::new()
        .fallback_service(ServeDir::new(&args.root))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    #[cfg(unix)]
    {
        if let Some(socket) = args.socket.clone() {
            if args.host.is_some() || args.port.is_some() {
                tracing::debug!("socket mode; ignoring host and port");
            }
            if dev_bridge::remove_socket(&socket)? {
                tracing::info!(socket = %socket.display(), "removed stale socket");
            }
            hooks.add({
                let socket = socket.clone();
                move || dev_bridge::remove_socket(&socket).map(|_| ())
            });

            let listener = tokio::net::UnixListener::bind(&socket)?;
            notifier.listening(&ListenAddress::opaque(socket.display().to_string()))?;
            tracing::info!(socket = %socket.display(), root = %args.root.display(), "dev server listening");
            axum::serve(listener, app).await?;
            guard.finish().into_result()?;
            return Ok(());
        }
    }

    let listener = tokio::net::TcpListener::bind(args.tcp_address()).await?;
    let address = ListenAddress::from(listener.local_addr()?);
    notifier.listening(&address)?;
    tracing::info!(%address, root = %args.root.display(), "dev server listening");

    axum::serve(listener, app).await?;
    guard.finish().into_result()?;
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
