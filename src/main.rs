mod routes;
mod controllers;
mod services;
mod models;
mod api_docs;
mod shared_state;
mod config;
mod error;

use std::net::SocketAddr;
use axum::{Json, Router, routing::get, response::Html};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;
use utoipa_scalar::Scalar;
use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::routes::pv_routes::pv_routes;
use crate::shared_state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Logging (RUST_LOG overrides the default filter)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,pv_calculator=debug,tower_http=debug")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("PV Calculator v{}", env!("CARGO_PKG_VERSION"));

    // 2. Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config = match Config::load_or_default(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load {}: {}", config_path, e);
            return Err(e);
        }
    };

    // 3. Shared state
    let state = AppState::new(config.month_clock());

    // 4. Start Axum HTTP server
    let app = Router::new()
        .merge(pv_routes(state))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("API Server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
