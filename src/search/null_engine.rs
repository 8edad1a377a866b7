use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::{EngineInfo, SearchEngine};

/// Engine-less fallback used when no SEARCH_URL is configured: every search
/// comes back empty and writes are swallowed, so the app still serves pages.
pub struct NullSearchEngine;

#[async_trait]
impl SearchEngine for NullSearchEngine {
    async fn info(&self) -> Result<EngineInfo> {
        Ok(EngineInfo {
            version: "0.0.0".into(),
            cluster_name: "none".into(),
            name: "null".into(),
        })
    }

    async fn search(&self, _index: &str, _body: Value) -> Result<Value> {
        Ok(json!({ "hits": { "total": { "value": 0 }, "hits": [] } }))
    }

    async fn index_doc(&self, _: &str, _: Option<&str>, _: &Value) -> Result<()> {
        Ok(())
    }

    async fn index_exists(&self, _: &str) -> Result<bool> {
        Ok(true)
    }

    async fn create_index(&self, _: &str, _: Value) -> Result<()> {
        Ok(())
    }

    async fn delete_index(&self, _: &str) -> Result<()> {
        Ok(())
    }

    async fn refresh(&self, _: &str) -> Result<()> {
        Ok(())
    }
}
