use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mongodb::bson::{doc, oid::ObjectId, to_document, Document};
use mongodb::options::FindOptions;
use serde_json::{json, Value};
use service_core::error::AppError;

use crate::dtos::{collect_documents, document_to_json, inserted_id_hex};
use crate::dtos::{GenreFilterParams, MyCollectionParams};
use crate::middleware::AuthUser;
use crate::startup::AppState;

const LATEST_MOVIES_LIMIT: i64 = 6;
const TOP_MOVIES_LIMIT: i64 = 5;

/// Path identifiers must parse as ObjectIds before anything touches the
/// database; anything else is a client error.
fn parse_movie_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid movie id: {}", id)))
}

/// The identifier is immutable, so a patch that carries one is applied
/// without it. A patch with nothing left to set is rejected up front rather
/// than surfaced as a driver error.
fn sanitize_patch(body: &Value) -> Result<Document, AppError> {
    let mut patch = to_document(body).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Update body must be a JSON object: {}", e))
    })?;
    patch.remove("_id");
    if patch.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Update body contains no fields to change"
        )));
    }
    Ok(patch)
}

pub async fn list_movies(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cursor = state.db.movies().find(doc! {}, None).await?;
    Ok(Json(collect_documents(cursor).await?))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let movie_id = parse_movie_id(&id)?;

    let movie = state
        .db
        .movies()
        .find_one(doc! { "_id": movie_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Movie not found")))?;

    Ok(Json(json!({
        "success": true,
        "result": document_to_json(movie),
    })))
}

/// Inserts the body verbatim. The catalog deliberately enforces no schema on
/// movie documents; the database only assigns the identifier.
pub async fn create_movie(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let movie = to_document(&body).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Movie body must be a JSON object: {}", e))
    })?;

    let result = state.db.movies().insert_one(movie, None).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "result": { "inserted_id": inserted_id_hex(&result) },
        })),
    ))
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let movie_id = parse_movie_id(&id)?;
    let patch = sanitize_patch(&body)?;

    let result = state
        .db
        .movies()
        .update_one(doc! { "_id": movie_id }, doc! { "$set": patch }, None)
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Movie not found")));
    }

    Ok(Json(json!({
        "success": true,
        "result": {
            "matched_count": result.matched_count,
            "modified_count": result.modified_count,
        },
    })))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let movie_id = parse_movie_id(&id)?;

    let result = state
        .db
        .movies()
        .delete_one(doc! { "_id": movie_id }, None)
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Movie not found")));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Movie deleted",
        "deleted_count": result.deleted_count,
    })))
}

pub async fn latest_movies(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .limit(LATEST_MOVIES_LIMIT)
        .build();

    let cursor = state.db.movies().find(doc! {}, options).await?;
    Ok(Json(collect_documents(cursor).await?))
}

pub async fn top_movies(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let options = FindOptions::builder()
        .sort(doc! { "rating": -1 })
        .limit(TOP_MOVIES_LIMIT)
        .build();

    let cursor = state.db.movies().find(doc! {}, options).await?;
    Ok(Json(collect_documents(cursor).await?))
}

pub async fn my_collection(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Query(params): Query<MyCollectionParams>,
) -> Result<impl IntoResponse, AppError> {
    // The filter email is caller-supplied and is not checked against the
    // verified identity; see DESIGN.md. Surface the mismatch in logs.
    if let Some(verified_email) = identity.email.as_deref() {
        if verified_email != params.email {
            tracing::warn!(
                requested = %params.email,
                verified = %verified_email,
                "my-collection queried with an email that differs from the verified identity"
            );
        }
    }

    let cursor = state
        .db
        .movies()
        .find(doc! { "addedBy": &params.email }, None)
        .await?;

    Ok(Json(collect_documents(cursor).await?))
}

pub async fn movies_by_genre(
    State(state): State<AppState>,
    Query(params): Query<GenreFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = params.into_filter();
    let cursor = state.db.movies().find(filter, None).await?;
    Ok(Json(collect_documents(cursor).await?))
}
