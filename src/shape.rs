use serde_json::Value;

use crate::models::{Book, BucketCount, ScoredBook, SearchSummary};

pub fn total_hits(response: &Value) -> u64 {
    response["hits"]["total"]["value"].as_u64().unwrap_or(0)
}

/// Map raw hits to presentation shape: the stored book plus its relevance
/// score. Hits whose `_source` doesn't deserialize as a Book are skipped.
pub fn shape_hits(response: &Value) -> Vec<ScoredBook> {
    response["hits"]["hits"]
        .as_array()
        .map(|hits| {
            hits.iter()
                .filter_map(|h| {
                    let book: Book = serde_json::from_value(h["_source"].clone()).ok()?;
                    Some(ScoredBook {
                        book,
                        score: h["_score"].as_f64(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn bucket_count(bucket: &Value) -> BucketCount {
    BucketCount {
        name: bucket["key"].as_str().unwrap_or("").to_string(),
        count: bucket["doc_count"].as_u64().unwrap_or(0),
    }
}

/// Highest-count bucket; on a tie the earlier bucket in engine order wins.
fn top_bucket(buckets: &Value) -> Option<BucketCount> {
    let buckets = buckets.as_array()?;
    let mut top: Option<BucketCount> = None;
    for b in buckets {
        let b = bucket_count(b);
        match &top {
            Some(current) if current.count >= b.count => {}
            _ => top = Some(b),
        }
    }
    top
}

/// Derive the search summary from the aggregation buckets. Zero matched
/// documents suppresses the whole summary (top-N and averages are undefined
/// over an empty set); otherwise each statistic is independently optional.
pub fn shape_summary(response: &Value) -> Option<SearchSummary> {
    let total = total_hits(response);
    if total == 0 {
        return None;
    }
    let aggs = &response["aggregations"];

    // Genre terms come back count-descending, so the first bucket is the
    // top genre and a count tie keeps the engine's order.
    let top_genre = aggs["genres"]["buckets"]
        .as_array()
        .and_then(|b| b.first())
        .map(bucket_count);

    Some(SearchSummary {
        total,
        top_genre,
        avg_rating: aggs["avg_rating"]["value"].as_f64(),
        top_price_range: top_bucket(&aggs["price_ranges"]["buckets"]),
    })
}

pub fn parse_genres(response: &Value) -> Vec<String> {
    response["aggregations"]["unique_genres"]["buckets"]
        .as_array()
        .map(|buckets| {
            buckets
                .iter()
                .filter_map(|b| b["key"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
