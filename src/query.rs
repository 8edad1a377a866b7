use serde_json::{json, Value};

/// Result window for every search endpoint. Fixed, no pagination cursor.
pub const RESULT_SIZE: usize = 10;

const TEXT_FIELDS: [&str; 3] = ["title", "author", "description"];

/// The four query shapes the app ever sends for book search. Construction is
/// pure; handlers pass the rendered body straight to the engine.
///
/// An empty request composes `MatchAll` (up to RESULT_SIZE documents). The
/// repository this replaces handled that case two different ways depending on
/// the endpoint; here the match-all policy applies everywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum BookQuery {
    MatchAll,
    Text(String),
    Genre(Vec<String>),
    Combined { text: String, genre: String },
}

impl BookQuery {
    pub fn from_params(text: Option<&str>, genre: Option<&str>) -> Self {
        let text = text.map(str::trim).filter(|t| !t.is_empty());
        let genre = genre.map(str::trim).filter(|g| !g.is_empty());
        match (text, genre) {
            (Some(t), Some(g)) => BookQuery::Combined {
                text: t.to_string(),
                genre: g.to_string(),
            },
            (Some(t), None) => BookQuery::Text(t.to_string()),
            (None, Some(g)) => BookQuery::Genre(vec![g.to_string()]),
            (None, None) => BookQuery::MatchAll,
        }
    }

    /// Any-of genre query for a comma-separated list; empty input falls back
    /// to match-all, same as the text path.
    pub fn from_genre_list(list: &str) -> Self {
        let genres: Vec<String> = list
            .split(',')
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();
        if genres.is_empty() {
            BookQuery::MatchAll
        } else {
            BookQuery::Genre(genres)
        }
    }

    /// True when the engine scores the hits; pure filters run unscored and
    /// their hits carry no relevance score.
    pub fn is_scored(&self) -> bool {
        matches!(self, BookQuery::Text(_) | BookQuery::Combined { .. })
    }

    fn query_clause(&self) -> Value {
        match self {
            BookQuery::MatchAll => json!({ "match_all": {} }),
            BookQuery::Text(text) => json!({
                "multi_match": {
                    "query": text,
                    "fields": TEXT_FIELDS,
                }
            }),
            BookQuery::Genre(genres) => json!({
                "terms": { "genre": genres }
            }),
            // Text under `must` contributes relevance; the genre clause sits
            // under `filter` so it restricts candidates without scoring.
            BookQuery::Combined { text, genre } => json!({
                "bool": {
                    "must": [{
                        "multi_match": {
                            "query": text,
                            "fields": TEXT_FIELDS,
                        }
                    }],
                    "filter": [{
                        "term": { "genre": genre }
                    }]
                }
            }),
        }
    }

    /// Full search body, optionally with the summary aggregations for the
    /// combined-search page.
    pub fn search_body(&self, with_aggs: bool) -> Value {
        let mut body = json!({
            "query": self.query_clause(),
            "size": RESULT_SIZE,
        });
        if with_aggs {
            body["aggs"] = summary_aggs();
        }
        body
    }
}

/// Aggregations backing the search summary: top genres, average rating, and
/// fixed price / publish-year range buckets.
pub fn summary_aggs() -> Value {
    json!({
        "genres": {
            "terms": { "field": "genre", "size": 10 }
        },
        "avg_rating": {
            "avg": { "field": "rating" }
        },
        "price_ranges": {
            "range": {
                "field": "price",
                "ranges": [
                    { "key": "Under $15", "to": 15 },
                    { "key": "$15-$20", "from": 15, "to": 20 },
                    { "key": "Over $20", "from": 20 }
                ]
            }
        },
        "publish_years": {
            "range": {
                "field": "publishYear",
                "ranges": [
                    { "key": "Classic (Before 1950)", "to": 1950 },
                    { "key": "Mid-Century (1950-1990)", "from": 1950, "to": 1990 },
                    { "key": "Modern (1990+)", "from": 1990 }
                ]
            }
        }
    })
}

/// Body for the distinct-genre listing: no hits, one alphabetically ordered
/// terms aggregation capped at 100 values.
pub fn genres_body() -> Value {
    json!({
        "size": 0,
        "aggs": {
            "unique_genres": {
                "terms": {
                    "field": "genre",
                    "size": 100,
                    "order": { "_key": "asc" }
                }
            }
        }
    })
}
