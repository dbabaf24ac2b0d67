//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! service keeps nothing in memory between requests: every save and record
//! request goes straight to the data directory named in the config.

use std::sync::Arc;

use crate::config::StudioConfig;

/// Clone is required by Axum; the config is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StudioConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: StudioConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// State rooted at a fresh directory under the system temp dir.
    pub fn temp_state() -> AppState {
        let dir = std::env::temp_dir().join(format!("studio-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        AppState::new(StudioConfig { data_dir: dir, ..StudioConfig::default() })
    }

    /// Serve the full router on an ephemeral local port. Returns the base URL.
    pub async fn spawn_app(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, crate::routes::app(state)).await.unwrap();
        });
        format!("http://{addr}")
    }
}
