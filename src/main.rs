#[macro_use]
extern crate rocket;

use rocket::http::Method;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use rocket_dyn_templates::Template;
use serde_json::json;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod analytics;
mod api;
mod config;
mod fixtures;
mod models;
mod query;
mod search;
mod shape;
mod state;
mod suggest;
mod routes {
    pub mod admin;
    pub mod analytics;
    pub mod search;
}

use api::ApiResult;
use search::BOOKS_INDEX;
use state::AppState;

// GET / — landing page with the search bar and a best-effort genre list.
#[get("/")]
async fn home(state: &State<AppState>) -> Template {
    let genres = match state.engine.search(BOOKS_INDEX, query::genres_body()).await {
        Ok(response) => shape::parse_genres(&response),
        Err(err) => {
            warn!("genre listing for home page failed: {err:#}");
            vec![]
        }
    };

    Template::render("home", json!({ "genres": genres }))
}

// GET /health — liveness probe against the engine's root info endpoint.
#[get("/health")]
async fn health(state: &State<AppState>) -> ApiResult {
    let info = state.engine.info().await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Connected to search engine",
        "engine": {
            "version": info.version,
            "cluster_name": info.cluster_name,
            "name": info.name,
        },
    })))
}

// Open CORS for development.
fn cors() -> rocket_cors::Cors {
    CorsOptions {
        allowed_origins: AllowedOrigins::all(),
        allowed_methods: vec![Method::Get, Method::Post, Method::Options]
            .into_iter()
            .map(From::from)
            .collect(),
        allowed_headers: AllowedHeaders::some(&["Content-Type", "Accept"]),
        allow_credentials: true,
        ..Default::default()
    }
    .to_cors()
    .expect("error building CORS")
}

pub fn app(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .attach(Template::fairing())
        .attach(cors())
        .mount("/", routes![home, health])
        .mount("/", routes::search::routes())
        .mount("/", routes::analytics::routes())
        .mount("/", routes::admin::routes())
}

#[launch]
fn rocket() -> Rocket<Build> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cfg = config::AppConfig::from_env();
    app(state::init_state(&cfg))
}
