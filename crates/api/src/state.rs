use std::sync::Arc;

use forge_core::identity::IdentityProvider;
use forge_core::meal::MessClock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted internally and the rest
/// is behind `Arc` or `Copy`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: forge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Resolves bearer credentials to callers.
    pub identity: Arc<dyn IdentityProvider>,
    /// Mess-local date and meal slot for requests that omit them.
    pub clock: MessClock,
}
