use axum::{
    extract::State,
    http::Method,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use hyper::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::lookup_host;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::dashboard::Dashboard;
use crate::error::{DashboardError, Result};

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "covid-dashboard",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn index(State(dashboard): State<Arc<Dashboard>>) -> impl IntoResponse {
    Html(dashboard.html().to_string())
}

async fn figures(State(dashboard): State<Arc<Dashboard>>) -> impl IntoResponse {
    Json(dashboard.figures().to_json())
}

/// Create the HTTP router serving the rendered dashboard
pub fn create_server(dashboard: Arc<Dashboard>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/figures.json", get(figures))
        .route("/health", get(health))
        .with_state(dashboard)
        .layer(ServiceBuilder::new().layer(cors))
}

/// First socket address for an IP literal or a resolvable host name
pub async fn resolve_addr(host: &str, port: u16) -> Result<SocketAddr> {
    let mut addrs = lookup_host((host, port))
        .await
        .map_err(|e| DashboardError::Config(format!("Invalid server host '{host}': {e}")))?;
    addrs.next().ok_or_else(|| {
        DashboardError::Config(format!("Server host '{host}' resolved to no address"))
    })
}

/// Serve the dashboard until the process is stopped
pub async fn start_server(dashboard: Arc<Dashboard>, host: &str, port: u16) -> Result<()> {
    let addr = resolve_addr(host, port).await?;
    let app = create_server(dashboard);

    info!(%addr, "Dashboard available at http://{addr}/");

    Server::try_bind(&addr)
        .map_err(server_error)?
        .serve(app.into_make_service())
        .await
        .map_err(server_error)?;
    Ok(())
}

fn server_error(e: hyper::Error) -> DashboardError {
    DashboardError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}
