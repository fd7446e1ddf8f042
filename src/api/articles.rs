//! Article API endpoints

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::{parse_id, ApiError, AppState};
use crate::models::ArticleQuery;

/// Query parameters accepted by the article listing
#[derive(Debug, Deserialize)]
pub struct ListArticlesQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub topic: Option<String>,
}

/// Get all articles, sorted and optionally filtered by topic
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ListArticlesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut query = ArticleQuery::default();

    if let Some(sort_by) = &params.sort_by {
        query.sort_by = sort_by.parse().map_err(|_| ApiError::BadRequest)?;
    }
    if let Some(order) = &params.order {
        query.order = order.parse().map_err(|_| ApiError::BadRequest)?;
    }
    if let Some(topic) = params.topic {
        if !state.topics.exists(&topic).await? {
            return Err(ApiError::not_found("topic not found"));
        }
        query.topic = Some(topic);
    }

    let articles = state.articles.list(&query).await?;
    Ok(Json(serde_json::json!({ "articles": articles })))
}

/// Get a single article by id
pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let article_id = parse_id(&article_id)?;

    let article = state
        .articles
        .get_by_id(article_id)
        .await?
        .ok_or_else(|| ApiError::not_found("article not found"))?;

    Ok(Json(serde_json::json!({ "article": article })))
}

/// Adjust an article's vote count by the `inc_votes` delta
pub async fn patch_article_votes(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let article_id = parse_id(&article_id)?;

    // Unknown body fields are ignored; `inc_votes` must be an integer.
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;
    let inc_votes = body
        .get("inc_votes")
        .and_then(Value::as_i64)
        .ok_or(ApiError::BadRequest)?;

    let article = state
        .articles
        .update_votes(article_id, inc_votes)
        .await?
        .ok_or_else(|| ApiError::not_found("article not found"))?;

    Ok(Json(serde_json::json!({ "article": article })))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::spawn_server;
    use axum::http::StatusCode;
    use chrono::{DateTime, Utc};

    fn created_at(article: &serde_json::Value) -> DateTime<Utc> {
        article["created_at"]
            .as_str()
            .expect("created_at string")
            .parse()
            .expect("parseable created_at")
    }

    #[tokio::test]
    async fn test_get_articles_sorted_by_default() {
        let (server, pool) = spawn_server().await;

        let response = server.get("/api/articles").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: serde_json::Value = response.json();
        let articles = body["articles"].as_array().expect("articles array");
        assert!(!articles.is_empty());

        for article in articles {
            assert!(article["article_id"].is_i64());
            assert!(article["votes"].is_i64());
            assert!(article["comment_count"].is_i64());
            assert!(article["author"].is_string());
            assert!(article["title"].is_string());
            assert!(article["topic"].is_string());
        }

        for pair in articles.windows(2) {
            assert!(created_at(&pair[0]) >= created_at(&pair[1]));
        }

        pool.close().await;
    }

    #[tokio::test]
    async fn test_get_articles_sort_by_votes_asc() {
        let (server, pool) = spawn_server().await;

        let response = server.get("/api/articles?sort_by=votes&order=asc").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: serde_json::Value = response.json();
        let articles = body["articles"].as_array().unwrap();
        for pair in articles.windows(2) {
            assert!(pair[0]["votes"].as_i64() <= pair[1]["votes"].as_i64());
        }

        pool.close().await;
    }

    #[tokio::test]
    async fn test_get_articles_filtered_by_topic() {
        let (server, pool) = spawn_server().await;

        let response = server.get("/api/articles?topic=coding").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: serde_json::Value = response.json();
        let articles = body["articles"].as_array().unwrap();
        assert!(!articles.is_empty());
        assert!(articles.iter().all(|a| a["topic"] == "coding"));

        pool.close().await;
    }

    #[tokio::test]
    async fn test_get_articles_unknown_topic() {
        let (server, pool) = spawn_server().await;

        let response = server.get("/api/articles?topic=gardening").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = response.json();
        assert_eq!(body["msg"], "topic not found");

        pool.close().await;
    }

    #[tokio::test]
    async fn test_get_articles_invalid_sort_column() {
        let (server, pool) = spawn_server().await;

        let response = server.get("/api/articles?sort_by=banana").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert_eq!(body["msg"], "Bad Request");

        pool.close().await;
    }

    #[tokio::test]
    async fn test_get_articles_invalid_order() {
        let (server, pool) = spawn_server().await;

        let response = server.get("/api/articles?order=sideways").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        pool.close().await;
    }

    #[tokio::test]
    async fn test_get_article_by_id() {
        let (server, pool) = spawn_server().await;

        let response = server.get("/api/articles/1").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: serde_json::Value = response.json();
        let article = &body["article"];
        assert_eq!(article["article_id"], 1);
        assert!(article["author"].is_string());
        assert!(article["title"].is_string());
        assert!(article["body"].is_string());
        assert!(article["topic"].is_string());
        assert!(article["votes"].is_i64());
        assert_eq!(article["comment_count"], 3);

        pool.close().await;
    }

    #[tokio::test]
    async fn test_get_article_by_id_not_found() {
        let (server, pool) = spawn_server().await;

        let response = server.get("/api/articles/500").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = response.json();
        assert_eq!(body["msg"], "article not found");

        pool.close().await;
    }

    #[tokio::test]
    async fn test_get_article_by_id_malformed() {
        let (server, pool) = spawn_server().await;

        let response = server.get("/api/articles/not_an_id").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert_eq!(body["msg"], "Bad Request");

        pool.close().await;
    }

    #[tokio::test]
    async fn test_patch_article_votes_increments() {
        let (server, pool) = spawn_server().await;

        let before: serde_json::Value = server.get("/api/articles/1").await.json();
        let votes_before = before["article"]["votes"].as_i64().unwrap();

        let response = server
            .patch("/api/articles/1")
            .json(&serde_json::json!({ "inc_votes": 10 }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: serde_json::Value = response.json();
        assert_eq!(body["article"]["votes"], votes_before + 10);

        pool.close().await;
    }

    #[tokio::test]
    async fn test_patch_article_votes_decrement_clamps_at_zero() {
        let (server, pool) = spawn_server().await;

        // Article 2 is seeded with zero votes
        let response = server
            .patch("/api/articles/2")
            .json(&serde_json::json!({ "inc_votes": -100 }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: serde_json::Value = response.json();
        assert_eq!(body["article"]["votes"], 0);

        pool.close().await;
    }

    #[tokio::test]
    async fn test_patch_article_votes_ignores_extra_fields() {
        let (server, pool) = spawn_server().await;

        let response = server
            .patch("/api/articles/1")
            .json(&serde_json::json!({ "inc_votes": 1, "some": "extra", "props": 13 }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        pool.close().await;
    }

    #[tokio::test]
    async fn test_patch_article_votes_missing_inc_votes() {
        let (server, pool) = spawn_server().await;

        let response = server
            .patch("/api/articles/1")
            .json(&serde_json::json!({}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert_eq!(body["msg"], "Bad Request");

        pool.close().await;
    }

    #[tokio::test]
    async fn test_patch_article_votes_non_numeric_inc_votes() {
        let (server, pool) = spawn_server().await;

        let response = server
            .patch("/api/articles/1")
            .json(&serde_json::json!({ "inc_votes": "ten" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        pool.close().await;
    }

    #[tokio::test]
    async fn test_patch_article_votes_not_found() {
        let (server, pool) = spawn_server().await;

        let response = server
            .patch("/api/articles/500")
            .json(&serde_json::json!({ "inc_votes": 1 }))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = response.json();
        assert_eq!(body["msg"], "article not found");

        pool.close().await;
    }

    #[tokio::test]
    async fn test_patch_article_votes_malformed_id() {
        let (server, pool) = spawn_server().await;

        let response = server
            .patch("/api/articles/banana")
            .json(&serde_json::json!({ "inc_votes": 1 }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        pool.close().await;
    }
}
