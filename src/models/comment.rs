//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reply to an article, authored by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    pub body: String,
    pub article_id: i64,
    pub author: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a comment. Votes start at zero and `created_at` is
/// assigned server-side at insert time.
#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    pub article_id: i64,
    pub author: String,
    pub body: String,
}
