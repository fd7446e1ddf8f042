//! Topic API endpoints

use axum::{extract::State, response::IntoResponse, Json};

use crate::api::{ApiError, AppState};

/// Get all topics
pub async fn list_topics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let topics = state.topics.list().await?;
    Ok(Json(serde_json::json!({ "topics": topics })))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::spawn_server;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_get_topics_returns_all_topics() {
        let (server, pool) = spawn_server().await;

        let response = server.get("/api/topics").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: serde_json::Value = response.json();
        let topics = body["topics"].as_array().expect("topics array");
        assert!(!topics.is_empty());
        for topic in topics {
            assert!(topic["slug"].is_string());
            assert!(topic["description"].is_string());
        }

        pool.close().await;
    }
}
