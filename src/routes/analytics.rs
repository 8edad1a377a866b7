use chrono::{DateTime, Utc};
use rocket::serde::json::Json;
use rocket::{Route, State};
use serde::Deserialize;
use serde_json::json;

use crate::analytics;
use crate::api::{ApiResult, ClientMeta};
use crate::models::{AnalyticsEvent, AnalyticsSummary, EventType};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EventInput {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub query: String,
    #[serde(default)]
    pub results_count: i64,
    pub timestamp: Option<DateTime<Utc>>,
}

// POST /analytics — record one event. The index is provisioned on first
// write; user agent and client address come from the request, not the body.
#[post("/analytics", data = "<input>")]
pub async fn record_event(
    input: Json<EventInput>,
    meta: ClientMeta,
    state: &State<AppState>,
) -> ApiResult {
    let input = input.into_inner();
    let event = AnalyticsEvent {
        event_type: input.event_type,
        query: input.query,
        results_count: input.results_count,
        timestamp: input.timestamp.unwrap_or_else(Utc::now),
        user_agent: meta.user_agent,
        ip: meta.ip,
    };

    analytics::record(state.engine.as_ref(), &event).await?;
    Ok(Json(json!({ "status": "success" })))
}

// GET /analytics — 7-day rolling summary. Never errors: a missing index or
// a failed engine call reads as the zero summary.
#[get("/analytics")]
pub async fn report(state: &State<AppState>) -> Json<AnalyticsSummary> {
    Json(analytics::report(state.engine.as_ref()).await)
}

pub fn routes() -> Vec<Route> {
    routes![record_event, report]
}
