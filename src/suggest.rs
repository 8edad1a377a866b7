use serde_json::{json, Value};

use crate::models::{Correction, MatchSuggestion, SuggestionResult};

/// Inputs shorter than this never reach the engine; the route returns an
/// empty result straight away.
pub const MIN_QUERY_LEN: usize = 2;

pub fn below_min_len(q: &str) -> bool {
    q.chars().count() < MIN_QUERY_LEN
}

/// One round-trip body carrying all three suggestion sources: term
/// suggesters on title and author (spell corrections, most-popular-term
/// tie-break), a phrase-prefix should-match for as-you-type hits, and a
/// title/author projection of up to 5 matching documents.
pub fn suggest_body(q: &str) -> Value {
    json!({
        "suggest": {
            "title_suggest": {
                "text": q,
                "term": {
                    "field": "title",
                    "suggest_mode": "popular",
                    "size": 5
                }
            },
            "author_suggest": {
                "text": q,
                "term": {
                    "field": "author",
                    "suggest_mode": "popular",
                    "size": 3
                }
            }
        },
        "query": {
            "bool": {
                "should": [
                    {
                        "match_phrase_prefix": {
                            "title": { "query": q, "max_expansions": 10 }
                        }
                    },
                    {
                        "match_phrase_prefix": {
                            "author": { "query": q, "max_expansions": 10 }
                        }
                    }
                ]
            }
        },
        "_source": ["title", "author"],
        "size": 5
    })
}

fn suggester_options(response: &Value, name: &str) -> Vec<Correction> {
    response["suggest"][name][0]["options"]
        .as_array()
        .map(|options| {
            options
                .iter()
                .map(|o| Correction {
                    text: o["text"].as_str().unwrap_or("").to_string(),
                    score: o["score"].as_f64().unwrap_or(0.0),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Merge the engine response into the suggestion payload. Corrections are
/// title options then author options in engine order, no dedup; matches are
/// the projected hits tagged "match".
pub fn parse_suggestions(response: &Value) -> SuggestionResult {
    let mut corrections = suggester_options(response, "title_suggest");
    corrections.extend(suggester_options(response, "author_suggest"));

    let matches = response["hits"]["hits"]
        .as_array()
        .map(|hits| {
            hits.iter()
                .map(|h| MatchSuggestion {
                    title: h["_source"]["title"].as_str().unwrap_or("").to_string(),
                    author: h["_source"]["author"].as_str().unwrap_or("").to_string(),
                    kind: "match".to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    SuggestionResult { corrections, matches }
}
