use anyhow::Result;
use serde_json::{json, Value};
use tracing::warn;

use crate::models::{AnalyticsEvent, AnalyticsSummary, DayCount, TermCount};
use crate::search::SearchEngine;

pub const ANALYTICS_INDEX: &str = "search_analytics";

fn analytics_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "type": { "type": "keyword" },
                "query": {
                    "type": "text",
                    "fields": {
                        "keyword": { "type": "keyword" }
                    }
                },
                "results_count": { "type": "integer" },
                "timestamp": { "type": "date" },
                "user_agent": { "type": "keyword" },
                "ip": { "type": "ip" }
            }
        }
    })
}

/// Lazily provision the analytics index. Two concurrent first writers can
/// both pass the exists check; the loser's create comes back
/// "resource_already_exists_exception" and is treated as success.
async fn ensure_index(engine: &dyn SearchEngine) -> Result<()> {
    if engine.index_exists(ANALYTICS_INDEX).await? {
        return Ok(());
    }
    match engine.create_index(ANALYTICS_INDEX, analytics_mapping()).await {
        Ok(()) => Ok(()),
        Err(err) if err.to_string().contains("resource_already_exists_exception") => Ok(()),
        Err(err) => Err(err),
    }
}

/// Append one event document. Best-effort, at-most-once: callers on the
/// user-facing path run this detached and only log a failure.
pub async fn record(engine: &dyn SearchEngine, event: &AnalyticsEvent) -> Result<()> {
    ensure_index(engine).await?;
    let doc = serde_json::to_value(event)?;
    engine.index_doc(ANALYTICS_INDEX, None, &doc).await
}

/// Detached recording for the search pages: spawn, don't await, warn on
/// failure. A dropped event is simply lost.
pub fn record_detached(engine: std::sync::Arc<dyn SearchEngine>, event: AnalyticsEvent) {
    rocket::tokio::spawn(async move {
        if let Err(err) = record(engine.as_ref(), &event).await {
            warn!("analytics event dropped: {err:#}");
        }
    });
}

/// Single-pass report body: trailing 7-day window over search and
/// suggestion-click events, hits suppressed, four independent aggregations.
pub fn report_body() -> Value {
    json!({
        "query": {
            "bool": {
                "must": [
                    { "terms": { "type": ["search", "suggestion_click"] } },
                    { "range": { "timestamp": { "gte": "now-7d" } } }
                ]
            }
        },
        "aggs": {
            "popular_searches": {
                "terms": { "field": "query.keyword", "size": 10 }
            },
            "searches_over_time": {
                "date_histogram": {
                    "field": "timestamp",
                    "calendar_interval": "1d",
                    "format": "yyyy-MM-dd"
                }
            },
            "total_searches": {
                "cardinality": { "field": "query.keyword" }
            },
            "avg_results": {
                "avg": { "field": "results_count" }
            }
        },
        "size": 0
    })
}

pub fn parse_report(response: &Value) -> AnalyticsSummary {
    let aggs = &response["aggregations"];

    let popular_searches = aggs["popular_searches"]["buckets"]
        .as_array()
        .map(|buckets| {
            buckets
                .iter()
                .map(|b| TermCount {
                    term: b["key"].as_str().unwrap_or("").to_string(),
                    count: b["doc_count"].as_u64().unwrap_or(0),
                })
                .collect()
        })
        .unwrap_or_default();

    // Only days with at least one event appear; gaps are not zero-filled.
    let searches_over_time = aggs["searches_over_time"]["buckets"]
        .as_array()
        .map(|buckets| {
            buckets
                .iter()
                .map(|b| DayCount {
                    day: b["key_as_string"].as_str().unwrap_or("").to_string(),
                    count: b["doc_count"].as_u64().unwrap_or(0),
                })
                .collect()
        })
        .unwrap_or_default();

    AnalyticsSummary {
        popular_searches,
        searches_over_time,
        // Cardinality is the engine's approximate estimate, accepted as-is.
        total_unique_searches: aggs["total_searches"]["value"].as_u64().unwrap_or(0),
        avg_results_per_search: aggs["avg_results"]["value"].as_f64().unwrap_or(0.0),
    }
}

/// 7-day summary. Missing index and engine failure both collapse to the
/// zero summary: analytics reads degrade, they never error. (This makes
/// "no data" and "engine down" indistinguishable to the dashboard.)
pub async fn report(engine: &dyn SearchEngine) -> AnalyticsSummary {
    match engine.search(ANALYTICS_INDEX, report_body()).await {
        Ok(response) => parse_report(&response),
        Err(err) => {
            warn!("analytics read failed, returning empty summary: {err:#}");
            AnalyticsSummary::default()
        }
    }
}
