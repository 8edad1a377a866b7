use rocket::serde::json::Json;
use rocket::{Route, State};
use serde_json::json;

use crate::api::ApiResult;
use crate::fixtures::sample_books;
use crate::search::{books_mapping, BOOKS_INDEX};
use crate::state::AppState;

// GET /seed — index the fixture set by id (reseeding upserts, never
// duplicates) and force a refresh so the books are searchable immediately.
#[get("/seed")]
pub async fn seed(state: &State<AppState>) -> ApiResult {
    let books = sample_books();
    for book in &books {
        let doc = serde_json::to_value(book).map_err(anyhow::Error::from)?;
        state.engine.index_doc(BOOKS_INDEX, Some(&book.id), &doc).await?;
    }
    state.engine.refresh(BOOKS_INDEX).await?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("{} books added successfully!", books.len()),
        "books": books.len(),
    })))
}

// GET /setup — drop (absent index tolerated) and recreate the books index
// with the fixed field mapping. Destructive.
#[get("/setup")]
pub async fn setup(state: &State<AppState>) -> ApiResult {
    state.engine.delete_index(BOOKS_INDEX).await?;
    state.engine.create_index(BOOKS_INDEX, books_mapping()).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Books index created successfully!",
    })))
}

pub fn routes() -> Vec<Route> {
    routes![seed, setup]
}
