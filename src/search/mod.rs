use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

pub mod null_engine;
pub mod opensearch_engine;

pub use null_engine::NullSearchEngine;
pub use opensearch_engine::OpenSearchEngine;

pub const BOOKS_INDEX: &str = "books";

#[derive(Debug, Clone)]
pub struct EngineInfo {
    pub version: String,
    pub cluster_name: String,
    pub name: String,
}

/// Capability boundary to the full-text engine. All query construction and
/// response shaping happens above this trait; implementations only move raw
/// JSON bodies over the wire.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn info(&self) -> Result<EngineInfo>;

    /// Run a search body against an index, returning the raw engine response.
    async fn search(&self, index: &str, body: Value) -> Result<Value>;

    /// Index one document. With an id this is an upsert; without, the engine
    /// assigns one (append-only writes).
    async fn index_doc(&self, index: &str, id: Option<&str>, doc: &Value) -> Result<()>;

    async fn index_exists(&self, index: &str) -> Result<bool>;

    /// Create an index with the given mapping body. "Already exists" is an
    /// error here; callers that need idempotence check `index_exists` first
    /// and tolerate the lost race.
    async fn create_index(&self, index: &str, mapping: Value) -> Result<()>;

    /// Delete an index. Absent index is not an error.
    async fn delete_index(&self, index: &str) -> Result<()>;

    /// Force a refresh so just-indexed documents become searchable.
    async fn refresh(&self, index: &str) -> Result<()>;
}

pub fn books_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "title": { "type": "text" },
                "author": { "type": "text" },
                "genre": { "type": "keyword" },
                "publishYear": { "type": "integer" },
                "description": { "type": "text" },
                "rating": { "type": "float" },
                "price": { "type": "float" }
            }
        }
    })
}

#[cfg(test)]
pub mod testutil {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::{EngineInfo, SearchEngine};

    /// In-memory stand-in for route tests: serves a canned search response,
    /// records every call, and can be flipped into a failing state.
    pub struct FakeEngine {
        pub search_response: Mutex<Value>,
        pub search_calls: AtomicUsize,
        pub indexed: Mutex<Vec<(String, Option<String>, Value)>>,
        pub created: Mutex<Vec<String>>,
        pub deleted: Mutex<Vec<String>>,
        pub refreshed: Mutex<Vec<String>>,
        pub exists: AtomicBool,
        pub fail: AtomicBool,
    }

    impl FakeEngine {
        pub fn new() -> Self {
            Self::with_response(json!({
                "hits": { "total": { "value": 0 }, "hits": [] }
            }))
        }

        pub fn with_response(search_response: Value) -> Self {
            Self {
                search_response: Mutex::new(search_response),
                search_calls: AtomicUsize::new(0),
                indexed: Mutex::new(Vec::new()),
                created: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
                refreshed: Mutex::new(Vec::new()),
                exists: AtomicBool::new(true),
                fail: AtomicBool::new(false),
            }
        }

        pub fn failing() -> Self {
            let engine = Self::new();
            engine.fail.store(true, Ordering::SeqCst);
            engine
        }

        fn check(&self) -> Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                Err(anyhow!("engine unavailable"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl SearchEngine for FakeEngine {
        async fn info(&self) -> Result<EngineInfo> {
            self.check()?;
            Ok(EngineInfo {
                version: "0.0.0-fake".into(),
                cluster_name: "fake-cluster".into(),
                name: "fake-node".into(),
            })
        }

        async fn search(&self, _index: &str, _body: Value) -> Result<Value> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            Ok(self.search_response.lock().unwrap().clone())
        }

        async fn index_doc(&self, index: &str, id: Option<&str>, doc: &Value) -> Result<()> {
            self.check()?;
            self.indexed.lock().unwrap().push((
                index.to_string(),
                id.map(String::from),
                doc.clone(),
            ));
            Ok(())
        }

        async fn index_exists(&self, _index: &str) -> Result<bool> {
            self.check()?;
            Ok(self.exists.load(Ordering::SeqCst))
        }

        async fn create_index(&self, index: &str, _mapping: Value) -> Result<()> {
            self.check()?;
            self.created.lock().unwrap().push(index.to_string());
            Ok(())
        }

        async fn delete_index(&self, index: &str) -> Result<()> {
            self.check()?;
            self.deleted.lock().unwrap().push(index.to_string());
            Ok(())
        }

        async fn refresh(&self, index: &str) -> Result<()> {
            self.check()?;
            self.refreshed.lock().unwrap().push(index.to_string());
            Ok(())
        }
    }
}
