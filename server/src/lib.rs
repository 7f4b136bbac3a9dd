//! HTTP service over an in-memory collection of items.
//!
//! Two route sets are available. [`app`] is the full API: paginated listing,
//! lookup by id, create with store-assigned ids, and name search, plus an
//! HTML landing page. [`minimal_app`] is the older echo-only API that never
//! stores anything. [`router`] picks one from a [`ServerConfig`].
//!
//! The store is passed in rather than created globally, so every test can
//! start from its own state.

pub mod body;
pub mod config;
pub mod error;
pub mod handlers;
pub mod legacy;
pub mod page;
pub mod params;
pub mod store;
pub mod types;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::{Mode, ServerConfig};
pub use error::{ApiError, FieldError};
pub use legacy::minimal_app;
pub use store::ItemStore;
pub use types::{CreatedItem, EchoedItem, Item, ItemRecord, Listing};

/// Full API backed by `store`.
pub fn app(store: ItemStore) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/items", get(handlers::list_items).post(handlers::create_item))
        .route("/items/", get(handlers::list_items).post(handlers::create_item))
        .route("/items/{id}", get(handlers::get_item))
        .route("/search", get(handlers::search_items))
        .with_state(store)
}

/// Builds the router described by `config`, with request tracing.
pub fn router(config: &ServerConfig) -> Router {
    let routes = match config.mode {
        Mode::Full if config.seed => app(ItemStore::demo()),
        Mode::Full => app(ItemStore::new()),
        Mode::Minimal => minimal_app(),
    };
    routes.layer(TraceLayer::new_for_http())
}

/// Serves `app` on an already-bound listener until the process exits.
pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

/// Binds `config.addr` and serves until Ctrl-C or SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %listener.local_addr()?, mode = ?config.mode, seed = config.seed, "listening");
    axum::serve(listener, router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
