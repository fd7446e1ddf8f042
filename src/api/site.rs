//! API description endpoint
//!
//! `GET /api` returns the route table as a JSON document so the surface is
//! discoverable without external documentation.

use axum::{response::IntoResponse, Json};

/// Describe every endpoint the API serves
pub async fn get_api() -> impl IntoResponse {
    Json(serde_json::json!({
        "GET /api": {
            "description": "a JSON description of all available endpoints"
        },
        "GET /api/topics": {
            "description": "an array of all topics"
        },
        "GET /api/articles": {
            "description": "an array of all articles with comment counts, newest first",
            "queries": ["sort_by", "order", "topic"]
        },
        "GET /api/articles/:article_id": {
            "description": "a single article with its comment count"
        },
        "PATCH /api/articles/:article_id": {
            "description": "adjusts an article's votes by the supplied inc_votes and returns the updated article",
            "body": { "inc_votes": "integer" }
        },
        "GET /api/articles/:article_id/comments": {
            "description": "an array of comments on an article, newest first"
        },
        "POST /api/articles/:article_id/comments": {
            "description": "posts a comment on an article and returns the created comment",
            "body": { "username": "string", "body": "string" }
        },
        "DELETE /api/comments/:comment_id": {
            "description": "deletes a comment by id"
        },
        "GET /api/users": {
            "description": "an array of all users"
        }
    }))
}
