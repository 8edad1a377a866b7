use anyhow::{anyhow, Result};
use async_trait::async_trait;
use opensearch::http::transport::Transport;
use opensearch::indices::{
    IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts,
};
use opensearch::{IndexParts, OpenSearch, SearchParts};
use serde_json::Value;

use super::{EngineInfo, SearchEngine};

pub struct OpenSearchEngine {
    client: OpenSearch,
}

impl OpenSearchEngine {
    pub fn new(url: &str) -> Result<Self> {
        let transport = Transport::single_node(url)?;
        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }
}

/// Turn a non-2xx engine response into an error carrying the engine's own
/// message, since the client returns Ok for any completed HTTP exchange.
async fn into_json(res: opensearch::http::response::Response) -> Result<Value> {
    let status = res.status_code();
    let body: Value = res.json().await?;
    if !status.is_success() {
        let reason = body["error"]["reason"]
            .as_str()
            .map(String::from)
            .unwrap_or_else(|| body.to_string());
        return Err(anyhow!("engine returned {status}: {reason}"));
    }
    Ok(body)
}

#[async_trait]
impl SearchEngine for OpenSearchEngine {
    async fn info(&self) -> Result<EngineInfo> {
        let res = self.client.info().send().await?;
        let body = into_json(res).await?;
        Ok(EngineInfo {
            version: body["version"]["number"].as_str().unwrap_or("").to_string(),
            cluster_name: body["cluster_name"].as_str().unwrap_or("").to_string(),
            name: body["name"].as_str().unwrap_or("").to_string(),
        })
    }

    async fn search(&self, index: &str, body: Value) -> Result<Value> {
        let res = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await?;
        into_json(res).await
    }

    async fn index_doc(&self, index: &str, id: Option<&str>, doc: &Value) -> Result<()> {
        let parts = match id {
            Some(id) => IndexParts::IndexId(index, id),
            None => IndexParts::Index(index),
        };
        let res = self.client.index(parts).body(doc).send().await?;
        into_json(res).await?;
        Ok(())
    }

    async fn index_exists(&self, index: &str) -> Result<bool> {
        let res = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await?;
        Ok(res.status_code().is_success())
    }

    async fn create_index(&self, index: &str, mapping: Value) -> Result<()> {
        let res = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(mapping)
            .send()
            .await?;
        into_json(res).await?;
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<()> {
        let res = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await?;
        // Deleting an absent index is fine; setup recreates from scratch.
        if res.status_code().as_u16() == 404 {
            return Ok(());
        }
        into_json(res).await?;
        Ok(())
    }

    async fn refresh(&self, index: &str) -> Result<()> {
        let res = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index]))
            .send()
            .await?;
        into_json(res).await?;
        Ok(())
    }
}
