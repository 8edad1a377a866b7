use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: Vec<String>,
    #[serde(rename = "publishYear")]
    pub publish_year: i32,
    pub description: String,
    pub rating: f64,
    pub price: f64,
}

/// A hit as returned to the caller: the stored book plus the engine's
/// relevance score. `score` is None for pure filter queries, which the
/// engine runs without scoring.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoredBook {
    #[serde(flatten)]
    pub book: Book,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Search,
    SuggestionClick,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalyticsEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub query: String,
    pub results_count: i64,
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
    // Mapped as an `ip` field in the engine, so an unknown client address
    // is omitted rather than written as a non-IP placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Correction {
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchSuggestion {
    pub title: String,
    pub author: String,
    #[serde(rename = "type")]
    pub kind: String, // always "match"
}

#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct SuggestionResult {
    pub corrections: Vec<Correction>,
    pub matches: Vec<MatchSuggestion>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TermCount {
    pub term: String,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayCount {
    pub day: String, // yyyy-MM-dd, UTC
    pub count: u64,
}

/// 7-day rolling analytics summary. `Default` is the all-zero summary the
/// reporter returns when the index is missing or the engine call fails.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct AnalyticsSummary {
    pub popular_searches: Vec<TermCount>,
    pub searches_over_time: Vec<DayCount>,
    pub total_unique_searches: u64,
    pub avg_results_per_search: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BucketCount {
    pub name: String,
    pub count: u64,
}

/// Summary statistics for the combined-search page, derived from the
/// aggregation buckets of a single search response. Each field is
/// independently optional: a missing bucket group nulls only its own stat.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchSummary {
    pub total: u64,
    pub top_genre: Option<BucketCount>,
    pub avg_rating: Option<f64>,
    pub top_price_range: Option<BucketCount>,
}
