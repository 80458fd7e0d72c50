use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use mongodb::bson::{doc, to_document};
use serde_json::{json, Value};
use service_core::error::AppError;

use crate::dtos::{collect_documents, inserted_id_hex};
use crate::startup::AppState;

/// Watch-list entries are accepted as-is: no ownership, no uniqueness, no
/// relation to the movies collection.
pub async fn add_watch_list_entry(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let entry = to_document(&body).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!(
            "Watch list entry must be a JSON object: {}",
            e
        ))
    })?;

    let result = state.db.watch_list().insert_one(entry, None).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "result": { "inserted_id": inserted_id_hex(&result) },
        })),
    ))
}

pub async fn list_watch_list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cursor = state.db.watch_list().find(doc! {}, None).await?;
    Ok(Json(collect_documents(cursor).await?))
}
