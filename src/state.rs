use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::search::{NullSearchEngine, OpenSearchEngine, SearchEngine};

/// Shared per-process state: one pooled engine handle, constructed at
/// startup and injected into every handler. No other cross-request state.
pub struct AppState {
    pub engine: Arc<dyn SearchEngine>,
}

pub fn init_state(cfg: &AppConfig) -> AppState {
    let engine: Arc<dyn SearchEngine> = match cfg.search_url.as_deref() {
        Some(url) => match OpenSearchEngine::new(url) {
            Ok(engine) => {
                info!("search engine at {url}");
                Arc::new(engine)
            }
            Err(err) => {
                warn!("invalid SEARCH_URL {url}, falling back to null engine: {err:#}");
                Arc::new(NullSearchEngine)
            }
        },
        None => {
            warn!("SEARCH_URL not set, running with null engine");
            Arc::new(NullSearchEngine)
        }
    };
    AppState { engine }
}
