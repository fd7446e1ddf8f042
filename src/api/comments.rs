//! Comment API endpoints

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::api::{parse_id, ApiError, AppState};
use crate::models::CreateCommentInput;

/// Get all comments on an article, newest first
///
/// An empty list for an existing article is a valid response; a missing
/// article is not.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let article_id = parse_id(&article_id)?;

    if !state.articles.exists(article_id).await? {
        return Err(ApiError::not_found("article does not exist"));
    }

    let comments = state.comments.list_by_article(article_id).await?;
    Ok(Json(serde_json::json!({ "comments": comments })))
}

/// Post a comment on an article
pub async fn create_comment(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let article_id = parse_id(&article_id)?;

    // Required fields only; anything else in the body is ignored.
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;
    let username = body
        .get("username")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ApiError::BadRequest)?;
    let comment_body = body
        .get("body")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ApiError::BadRequest)?;

    // Existence checks give the two distinct 404 messages; the insert's own
    // foreign keys remain the backstop.
    if !state.articles.exists(article_id).await? {
        return Err(ApiError::not_found("article does not exist"));
    }
    if state.users.get_by_username(username).await?.is_none() {
        return Err(ApiError::not_found("user does not exist"));
    }

    let comment = state
        .comments
        .insert(CreateCommentInput {
            article_id,
            author: username.to_string(),
            body: comment_body.to_string(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "comment": comment })),
    ))
}

/// Delete a comment by id
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let comment_id = parse_id(&comment_id)?;

    if state.comments.delete(comment_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("comment does not exist"))
    }
}
