use chrono::Utc;
use rocket::serde::json::Json;
use rocket::{Route, State};
use rocket_dyn_templates::Template;
use serde_json::json;
use tracing::warn;

use crate::analytics;
use crate::api::{ApiError, ApiResult, ClientMeta};
use crate::models::{AnalyticsEvent, EventType, SuggestionResult};
use crate::query::{self, BookQuery};
use crate::search::BOOKS_INDEX;
use crate::shape;
use crate::state::AppState;
use crate::suggest;

// GET /search?q= — multi-field text match; empty q returns the first 10
// documents (match-all policy, applied consistently across endpoints).
#[get("/search?<q>")]
pub async fn search(q: Option<&str>, state: &State<AppState>) -> ApiResult {
    let query = BookQuery::from_params(q, None);
    let response = state
        .engine
        .search(BOOKS_INDEX, query.search_body(false))
        .await?;

    Ok(Json(json!({
        "status": "success",
        "total": shape::total_hits(&response),
        "query": q.unwrap_or(""),
        "books": shape::shape_hits(&response),
    })))
}

// GET /search/genre?q= — comma-separated list, matches any listed genre.
#[get("/search/genre?<q>")]
pub async fn search_genre(q: Option<&str>, state: &State<AppState>) -> ApiResult {
    let query = BookQuery::from_genre_list(q.unwrap_or(""));
    let response = state
        .engine
        .search(BOOKS_INDEX, query.search_body(false))
        .await?;

    Ok(Json(json!({
        "status": "success",
        "total": shape::total_hits(&response),
        "query": q.unwrap_or(""),
        "books": shape::shape_hits(&response),
    })))
}

// GET /suggestions?q= — corrections + as-you-type matches. Input under the
// minimum length short-circuits before any engine call.
#[get("/suggestions?<q>")]
pub async fn suggestions(q: Option<&str>, state: &State<AppState>) -> ApiResult {
    let q = q.unwrap_or("");
    if suggest::below_min_len(q) {
        return Ok(Json(json!({ "suggestions": SuggestionResult::default() })));
    }

    let response = state
        .engine
        .search(BOOKS_INDEX, suggest::suggest_body(q))
        .await?;

    Ok(Json(json!({
        "suggestions": suggest::parse_suggestions(&response)
    })))
}

// GET /genres — sorted distinct genre values; degradable read, so engine
// failure yields an empty list instead of an error.
#[get("/genres")]
pub async fn genres(state: &State<AppState>) -> Json<serde_json::Value> {
    let genres = match state.engine.search(BOOKS_INDEX, query::genres_body()).await {
        Ok(response) => shape::parse_genres(&response),
        Err(err) => {
            warn!("genre listing failed, returning empty list: {err:#}");
            vec![]
        }
    };
    Json(json!({ "status": "success", "genres": genres }))
}

// GET /combined-search?q=&genre= — the rendered search page: summary stats
// plus up to 10 hits. Records a search event detached from the response.
#[get("/combined-search?<q>&<genre>")]
pub async fn combined_search(
    q: Option<&str>,
    genre: Option<&str>,
    meta: ClientMeta,
    state: &State<AppState>,
) -> Result<Template, ApiError> {
    let query = BookQuery::from_params(q, genre);
    let response = state
        .engine
        .search(BOOKS_INDEX, query.search_body(true))
        .await?;

    let books = shape::shape_hits(&response);
    let summary = shape::shape_summary(&response);
    let total = shape::total_hits(&response);

    // Search events always carry a query; plain browsing records nothing.
    let tracked = q.map(str::trim).filter(|t| !t.is_empty());
    if let Some(tracked) = tracked {
        analytics::record_detached(
            state.engine.clone(),
            AnalyticsEvent {
                event_type: EventType::Search,
                query: tracked.to_string(),
                results_count: total as i64,
                timestamp: Utc::now(),
                user_agent: meta.user_agent,
                ip: meta.ip,
            },
        );
    }

    Ok(Template::render(
        "combined_search",
        json!({
            "query": q.unwrap_or(""),
            "genre": genre.unwrap_or(""),
            "total": total,
            "summary": summary,
            "books": books,
        }),
    ))
}

pub fn routes() -> Vec<Route> {
    routes![search, search_genre, suggestions, genres, combined_search]
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use rocket::http::Status;
    use rocket::local::asynchronous::Client;
    use serde_json::{json, Value};

    use crate::search::testutil::FakeEngine;
    use crate::state::AppState;

    async fn client_with(engine: Arc<FakeEngine>) -> Client {
        let rocket = crate::app(AppState { engine: engine.clone() });
        Client::tracked(rocket).await.expect("valid rocket")
    }

    fn seeded_wizard_response() -> Value {
        json!({
            "hits": {
                "total": { "value": 1 },
                "hits": [{
                    "_id": "3",
                    "_score": 1.94,
                    "_source": {
                        "id": "3",
                        "title": "Harry Potter and the Sorcerers Stone",
                        "author": "J.K. Rowling",
                        "genre": ["Fantasy", "Young Adult"],
                        "publishYear": 1997,
                        "description": "A young wizard discovers his magical heritage on his 11th birthday",
                        "rating": 4.7,
                        "price": 16.99
                    }
                }]
            }
        })
    }

    #[rocket::async_test]
    async fn search_returns_scored_hits() {
        let engine = Arc::new(FakeEngine::with_response(seeded_wizard_response()));
        let client = client_with(engine).await;

        let res = client.get("/search?q=wizard").dispatch().await;
        assert_eq!(res.status(), Status::Ok);
        let body: Value = res.into_json().await.unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["total"], 1);
        assert_eq!(body["books"][0]["title"], "Harry Potter and the Sorcerers Stone");
        assert!(body["books"][0]["score"].as_f64().unwrap() > 0.0);
    }

    #[rocket::async_test]
    async fn search_surfaces_engine_failure_as_error_envelope() {
        let engine = Arc::new(FakeEngine::failing());
        let client = client_with(engine).await;

        let res = client.get("/search?q=wizard").dispatch().await;
        assert_eq!(res.status(), Status::InternalServerError);
        let body: Value = res.into_json().await.unwrap();
        assert_eq!(body["status"], "error");
    }

    #[rocket::async_test]
    async fn suggestions_surface_engine_failure_as_error_envelope() {
        let engine = Arc::new(FakeEngine::failing());
        let client = client_with(engine).await;

        let res = client.get("/suggestions?q=ha").dispatch().await;
        assert_eq!(res.status(), Status::InternalServerError);
        let body: Value = res.into_json().await.unwrap();
        assert_eq!(body["status"], "error");
    }

    #[rocket::async_test]
    async fn short_suggestion_input_never_reaches_the_engine() {
        let engine = Arc::new(FakeEngine::new());
        let client = client_with(engine.clone()).await;

        for q in ["", "h"] {
            let res = client.get(format!("/suggestions?q={q}")).dispatch().await;
            assert_eq!(res.status(), Status::Ok);
            let body: Value = res.into_json().await.unwrap();
            assert_eq!(body["suggestions"]["corrections"], json!([]));
            assert_eq!(body["suggestions"]["matches"], json!([]));
        }
        assert_eq!(engine.search_calls.load(Ordering::SeqCst), 0);
    }

    #[rocket::async_test]
    async fn genres_degrade_to_empty_on_engine_failure() {
        let engine = Arc::new(FakeEngine::failing());
        let client = client_with(engine).await;

        let res = client.get("/genres").dispatch().await;
        assert_eq!(res.status(), Status::Ok);
        let body: Value = res.into_json().await.unwrap();
        assert_eq!(body["genres"], json!([]));
    }

    #[rocket::async_test]
    async fn genres_list_comes_back_in_engine_sorted_order() {
        let engine = Arc::new(FakeEngine::with_response(json!({
            "aggregations": {
                "unique_genres": {
                    "buckets": [
                        { "key": "Adventure", "doc_count": 1 },
                        { "key": "Classic", "doc_count": 2 },
                        { "key": "Drama", "doc_count": 1 },
                        { "key": "Fantasy", "doc_count": 2 },
                        { "key": "Fiction", "doc_count": 2 },
                        { "key": "Romance", "doc_count": 1 },
                        { "key": "Young Adult", "doc_count": 1 }
                    ]
                }
            }
        })));
        let client = client_with(engine).await;

        let res = client.get("/genres").dispatch().await;
        let body: Value = res.into_json().await.unwrap();
        assert_eq!(
            body["genres"],
            json!(["Adventure", "Classic", "Drama", "Fantasy", "Fiction", "Romance", "Young Adult"])
        );
    }

    #[rocket::async_test]
    async fn browsing_without_query_records_no_search_event() {
        let engine = Arc::new(FakeEngine::new());
        let client = client_with(engine.clone()).await;

        for uri in ["/combined-search", "/combined-search?q=%20%20&genre=Fantasy"] {
            let res = client.get(uri).dispatch().await;
            assert_eq!(res.status(), Status::Ok);
        }

        // Recording runs detached; give any stray task time to land.
        rocket::tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(engine.indexed.lock().unwrap().is_empty());
    }

    #[rocket::async_test]
    async fn search_event_carries_the_trimmed_query() {
        let engine = Arc::new(FakeEngine::with_response(seeded_wizard_response()));
        let client = client_with(engine.clone()).await;

        let res = client.get("/combined-search?q=%20wizard%20").dispatch().await;
        assert_eq!(res.status(), Status::Ok);

        for _ in 0..100 {
            if !engine.indexed.lock().unwrap().is_empty() {
                break;
            }
            rocket::tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let indexed = engine.indexed.lock().unwrap();
        assert_eq!(indexed.len(), 1);
        let doc = &indexed[0].2;
        assert_eq!(doc["type"], "search");
        assert_eq!(doc["query"], "wizard");
        assert_eq!(doc["results_count"], 1);
    }

    #[rocket::async_test]
    async fn combined_search_page_renders() {
        let engine = Arc::new(FakeEngine::with_response(seeded_wizard_response()));
        let client = client_with(engine).await;

        let res = client
            .get("/combined-search?q=wizard&genre=Fantasy")
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);
        let page = res.into_string().await.unwrap();
        assert!(page.contains("Harry Potter"));
    }
}
