//! Repository layer
//!
//! One repository per entity. Each repository is a trait with a sqlx-backed
//! implementation dispatching to per-driver query functions. Every operation
//! issues a single parameterized SQL statement and returns a tagged
//! [`crate::db::StoreError`] on failure.

mod article;
mod comment;
mod topic;
mod user;

pub use article::{ArticleRepository, SqlxArticleRepository};
pub use comment::{CommentRepository, SqlxCommentRepository};
pub use topic::{SqlxTopicRepository, TopicRepository};
pub use user::{SqlxUserRepository, UserRepository};
