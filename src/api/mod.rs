//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP endpoints for the Newswire API:
//! - Topic listing
//! - Article listing, lookup, and vote patching
//! - Comment listing, creation, and deletion
//! - User listing
//! - The `/api` route-table document
//!
//! Route order matters: concrete routes first, then the catch-all fallback,
//! with `ApiError` shaping every failure body.

pub mod articles;
pub mod comments;
pub mod error;
pub mod site;
pub mod topics;
pub mod users;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

use crate::db::repositories::{
    ArticleRepository, CommentRepository, SqlxArticleRepository, SqlxCommentRepository,
    SqlxTopicRepository, SqlxUserRepository, TopicRepository, UserRepository,
};
use crate::db::DynDatabasePool;

/// Application state containing the pool and the repository handles.
///
/// Constructed once at startup (or per test) and cloned into every handler;
/// there are no ambient singletons.
#[derive(Clone)]
pub struct AppState {
    pub pool: DynDatabasePool,
    pub topics: Arc<dyn TopicRepository>,
    pub users: Arc<dyn UserRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self {
            topics: Arc::new(SqlxTopicRepository::new(pool.clone())),
            users: Arc::new(SqlxUserRepository::new(pool.clone())),
            articles: Arc::new(SqlxArticleRepository::new(pool.clone())),
            comments: Arc::new(SqlxCommentRepository::new(pool.clone())),
            pool,
        }
    }
}

/// Build the API route table
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .route("/api", get(site::get_api))
        .route("/api/topics", get(topics::list_topics))
        .route("/api/articles", get(articles::list_articles))
        .route(
            "/api/articles/{article_id}",
            get(articles::get_article).patch(articles::patch_article_votes),
        )
        .route(
            "/api/articles/{article_id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/api/comments/{comment_id}", delete(comments::delete_comment))
        .route("/api/users", get(users::list_users))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            cors_origin
                .parse::<HeaderValue>()
                .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000")),
        )
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    build_api_router()
        // Unmatched paths get the fixed not-found body, last.
        .fallback(invalid_url)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Catch-all for unmatched paths
async fn invalid_url() -> ApiError {
    ApiError::not_found("invalid url")
}

/// Parse a numeric path parameter, mapping failure to the fixed 400 body.
///
/// Ids are extracted as strings so a malformed value reaches the error
/// taxonomy instead of axum's default rejection.
pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::BadRequest)
}
