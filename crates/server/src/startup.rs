use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use service::store::PayloadStore;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> Result<SocketAddr, StartupError> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    let addr = format!("{}:{}", host, port);
    addr.parse()
        .map_err(|source| StartupError::InvalidBindAddr { addr, source })
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> Result<(), StartupError> {
    dotenv().ok();
    init_logging();

    // The one piece of shared state: the payload slot, empty at start.
    let store = PayloadStore::new();

    let app: Router = routes::build_router(store, build_cors());

    let addr = load_bind_addr()?;
    info!(%addr, "starting payload check server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    axum::serve(listener, app)
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    Ok(())
}
