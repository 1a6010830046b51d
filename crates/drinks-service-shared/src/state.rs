//! Application state for the HTTP service.
//!
//! Handlers reach the catalog through the store handle held here; nothing in
//! the process keeps a global connection.

use std::sync::Arc;

use drinks_lib::{CatalogStore, Error as LibError, MongoStore};

use crate::config::ServiceConfig;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The connection string could not be used to build a driver client.
    StoreConnect(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreConnect(e) => write!(f, "failed to set up document store client: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreConnect(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::StoreConnect(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` internally); share it via axum's `State`
/// extractor.
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use drinks_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let store = state.store();
///     // ... query the catalog
/// }
///
/// let state = AppState::connect(&ServiceConfig::from_env()).await?;
/// let app = Router::new()
///     .route("/drinks", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn CatalogStore>,
    strict_not_found: bool,
}

impl AppState {
    /// Create the MongoDB store named by `config` and declare its indexes.
    ///
    /// An unreachable server is not fatal here: the driver reconnects on
    /// demand and `/health/ready` reports the outage.
    pub async fn connect(config: &ServiceConfig) -> Result<Self, AppStateError> {
        tracing::info!(url = %config.redacted_mongo_url(), "connecting to document store");
        let store = MongoStore::connect(&config.mongo_url).await?;

        match store.ping().await {
            Ok(()) => {
                tracing::info!(database = %store.database_name(), "document store reachable");
                if let Err(e) = store.ensure_indexes().await {
                    tracing::warn!(error = %e, "failed to ensure slug indexes");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "document store not reachable yet, continuing");
            }
        }

        Ok(Self::from_store(Arc::new(store)).with_strict_not_found(config.strict_not_found))
    }

    /// Create application state around any store.
    ///
    /// This is useful for testing with [`drinks_lib::MemoryStore`].
    pub fn from_store(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                strict_not_found: false,
            }),
        }
    }

    /// Return a copy of this state with strict not-found handling set.
    pub fn with_strict_not_found(self, strict: bool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: Arc::clone(&self.inner.store),
                strict_not_found: strict,
            }),
        }
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.inner.store.as_ref()
    }

    /// Whether lookup misses should be answered with 404.
    pub fn strict_not_found(&self) -> bool {
        self.inner.strict_not_found
    }

    /// Close the store's connections. Call once the server has stopped.
    pub async fn shutdown(&self) {
        self.inner.store.shutdown().await;
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.inner.store)
            .field("strict_not_found", &self.inner.strict_not_found)
            .finish()
    }
}
