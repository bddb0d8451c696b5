use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::media::MediaClient;

/// Shared per-process resources, injected into handlers via axum state.
/// The pool is the only cross-request shared resource; handlers hold no
/// state of their own.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub media: MediaClient,
    pub config: Arc<AppConfig>,
}
