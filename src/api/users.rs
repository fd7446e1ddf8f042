//! User API endpoints

use axum::{extract::State, response::IntoResponse, Json};

use crate::api::{ApiError, AppState};

/// Get all users
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(serde_json::json!({ "users": users })))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::spawn_server;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_get_users_returns_all_users() {
        let (server, pool) = spawn_server().await;

        let response = server.get("/api/users").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: serde_json::Value = response.json();
        let users = body["users"].as_array().expect("users array");
        assert!(!users.is_empty());
        for user in users {
            assert!(user["username"].is_string());
            assert!(user["name"].is_string());
            assert!(user["avatar_url"].is_string());
        }

        pool.close().await;
    }
}
