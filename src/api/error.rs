//! API error type
//!
//! The single place where error kinds become HTTP statuses. Handlers raise
//! `ApiError` (directly for validation and missing-row conditions, or via
//! `?` on repository calls) and the `IntoResponse` impl shapes every failure
//! as `{ "msg": "..." }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::db::StoreError;

/// Error taxonomy for the API surface.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed input: non-numeric id, missing or empty required field,
    /// unknown sort column or order.
    #[error("Bad Request")]
    BadRequest,

    /// A referenced entity does not exist. The message is route-specific.
    #[error("{0}")]
    NotFound(String),

    /// Anything unanticipated.
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::not_found("not found"),
            // A constraint violation that slipped past the handler's own
            // existence checks is still a missing-reference condition.
            StoreError::ForeignKey => ApiError::not_found("not found"),
            StoreError::Database(e) => {
                tracing::error!("database error: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(serde_json::json!({ "msg": self.to_string() }))).into_response()
    }
}
