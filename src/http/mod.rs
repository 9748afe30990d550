//! HTTP transport - maps the phonebook routes onto a contact store.
//!
//! Uses axum for routing and tower-http for CORS, request tracing and the
//! static frontend bundle.
//!
//! ## Routes
//!
//! - `GET /health`, `GET /version` - liveness and API version, plain text.
//! - `GET /api/info` - HTML summary with the contact count.
//! - `GET|POST /api/persons` - list or create contacts.
//! - `GET|PUT|DELETE /api/persons/:id` - one contact.
//!
//! A known path with another method answers 404 `{"error":"unknown endpoint"}`.
//! So does any other path, except in production, where it is served from the
//! frontend bundle.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use phonebook::{http, Config, InMemoryContactStore};
//!
//! let state = http::AppState::new(Arc::new(InMemoryContactStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(state.clone());
//!
//! // Or build the full application and serve it
//! let app = http::app(state, &Config::default());
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
//! http::serve(listener, app).await?;
//! ```

mod body;
mod error;
mod handlers;

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, MethodRouter};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::store::ContactStore;

pub use error::ApiError;

/// Shared handler state: the injected store handle.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }
}

/// Build the API router. Unmatched routes get the `unknown endpoint` 404.
pub fn router(state: AppState) -> Router {
    api_routes()
        .fallback(handlers::unknown_endpoint)
        .with_state(state)
}

/// Build the full application: API routes, middleware and, in production,
/// the frontend bundle as fallback.
pub fn app(state: AppState, config: &Config) -> Router {
    let routes = if config.is_production() {
        info!(dir = %config.frontend_dir.display(), "Serving frontend bundle");
        api_routes()
            .fallback_service(frontend(&config.frontend_dir))
            .with_state(state)
    } else {
        router(state)
    };

    routes
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", endpoint(get(handlers::health)))
        .route("/version", endpoint(get(handlers::version)))
        .route("/api/info", endpoint(get(handlers::info)))
        .route(
            "/api/persons",
            endpoint(get(handlers::list_persons).post(handlers::create_person)),
        )
        .route(
            "/api/persons/:id",
            endpoint(
                get(handlers::get_person)
                    .put(handlers::update_person)
                    .delete(handlers::delete_person),
            ),
        )
}

/// Unsupported methods fall through to `unknown endpoint` instead of 405.
fn endpoint(methods: MethodRouter<AppState>) -> MethodRouter<AppState> {
    methods.fallback(handlers::unknown_endpoint)
}

/// Static files from `dir`; unknown paths resolve to `index.html` so the
/// frontend can route them.
fn frontend(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

/// Serve `app` on `listener` until SIGINT or SIGTERM.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    let address = listener.local_addr()?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
