use std::env;

pub struct AppConfig {
    /// Engine base URL. None runs the app against the null engine.
    pub search_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // fine if no .env exists

        Self {
            search_url: env::var("SEARCH_URL")
                .or_else(|_| env::var("ELASTICSEARCH_URL"))
                .ok(),
        }
    }
}
