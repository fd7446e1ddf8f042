//! Comment repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};

use crate::config::DatabaseDriver;
use crate::db::{DynDatabasePool, StoreResult};
use crate::models::{Comment, CreateCommentInput};

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// List comments on an article, newest first
    async fn list_by_article(&self, article_id: i64) -> StoreResult<Vec<Comment>>;

    /// Insert a comment with zero votes and a server-assigned timestamp,
    /// returning the created row
    async fn insert(&self, input: CreateCommentInput) -> StoreResult<Comment>;

    /// Delete a comment by id; false when no such comment exists
    async fn delete(&self, comment_id: i64) -> StoreResult<bool>;
}

/// sqlx-backed comment repository
pub struct SqlxCommentRepository {
    pool: DynDatabasePool,
}

impl SqlxCommentRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn list_by_article(&self, article_id: i64) -> StoreResult<Vec<Comment>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_by_article_sqlite(self.pool.as_sqlite().unwrap(), article_id).await
            }
            DatabaseDriver::Mysql => {
                list_by_article_mysql(self.pool.as_mysql().unwrap(), article_id).await
            }
        }
    }

    async fn insert(&self, input: CreateCommentInput) -> StoreResult<Comment> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => insert_sqlite(self.pool.as_sqlite().unwrap(), input).await,
            DatabaseDriver::Mysql => insert_mysql(self.pool.as_mysql().unwrap(), input).await,
        }
    }

    async fn delete(&self, comment_id: i64) -> StoreResult<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_sqlite(self.pool.as_sqlite().unwrap(), comment_id).await,
            DatabaseDriver::Mysql => delete_mysql(self.pool.as_mysql().unwrap(), comment_id).await,
        }
    }
}

// SQLite implementations

fn comment_from_sqlite_row(r: &sqlx::sqlite::SqliteRow) -> Comment {
    Comment {
        comment_id: r.get("comment_id"),
        body: r.get("body"),
        article_id: r.get("article_id"),
        author: r.get("author"),
        votes: r.get("votes"),
        created_at: r.get("created_at"),
    }
}

async fn list_by_article_sqlite(pool: &SqlitePool, article_id: i64) -> StoreResult<Vec<Comment>> {
    let rows = sqlx::query(
        "SELECT comment_id, body, article_id, author, votes, created_at \
         FROM comments WHERE article_id = ? ORDER BY created_at DESC",
    )
    .bind(article_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(comment_from_sqlite_row).collect())
}

async fn insert_sqlite(pool: &SqlitePool, input: CreateCommentInput) -> StoreResult<Comment> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO comments (body, article_id, author, votes, created_at) \
         VALUES (?, ?, ?, 0, ?)",
    )
    .bind(&input.body)
    .bind(input.article_id)
    .bind(&input.author)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Comment {
        comment_id: result.last_insert_rowid(),
        body: input.body,
        article_id: input.article_id,
        author: input.author,
        votes: 0,
        created_at: now,
    })
}

async fn delete_sqlite(pool: &SqlitePool, comment_id: i64) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM comments WHERE comment_id = ?")
        .bind(comment_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// MySQL implementations

fn comment_from_mysql_row(r: &sqlx::mysql::MySqlRow) -> Comment {
    Comment {
        comment_id: r.get("comment_id"),
        body: r.get("body"),
        article_id: r.get("article_id"),
        author: r.get("author"),
        votes: r.get("votes"),
        created_at: r.get("created_at"),
    }
}

async fn list_by_article_mysql(pool: &MySqlPool, article_id: i64) -> StoreResult<Vec<Comment>> {
    let rows = sqlx::query(
        "SELECT comment_id, body, article_id, author, votes, created_at \
         FROM comments WHERE article_id = ? ORDER BY created_at DESC",
    )
    .bind(article_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(comment_from_mysql_row).collect())
}

async fn insert_mysql(pool: &MySqlPool, input: CreateCommentInput) -> StoreResult<Comment> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO comments (body, article_id, author, votes, created_at) \
         VALUES (?, ?, ?, 0, ?)",
    )
    .bind(&input.body)
    .bind(input.article_id)
    .bind(&input.author)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Comment {
        comment_id: result.last_insert_id() as i64,
        body: input.body,
        article_id: input.article_id,
        author: input.author,
        votes: 0,
        created_at: now,
    })
}

async fn delete_mysql(pool: &MySqlPool, comment_id: i64) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM comments WHERE comment_id = ?")
        .bind(comment_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations, seed, StoreError};

    async fn repo() -> SqlxCommentRepository {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();
        seed::seed_sample_data(&pool).await.unwrap();
        SqlxCommentRepository::new(pool)
    }

    #[tokio::test]
    async fn test_list_by_article_newest_first() {
        let repo = repo().await;
        let comments = repo.list_by_article(1).await.unwrap();

        assert_eq!(comments.len(), 3);
        for pair in comments.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn test_list_by_article_empty() {
        let repo = repo().await;
        let comments = repo.list_by_article(2).await.unwrap();
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn test_insert_defaults_votes_to_zero() {
        let repo = repo().await;
        let comment = repo
            .insert(CreateCommentInput {
                article_id: 1,
                author: "lurker".to_string(),
                body: "still lurkin".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(comment.votes, 0);
        assert_eq!(comment.article_id, 1);
        assert_eq!(comment.author, "lurker");
        assert!(comment.comment_id > 0);
    }

    #[tokio::test]
    async fn test_insert_unknown_author_is_foreign_key_error() {
        let repo = repo().await;
        let err = repo
            .insert(CreateCommentInput {
                article_id: 1,
                author: "ghost".to_string(),
                body: "boo".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::ForeignKey));
    }

    #[tokio::test]
    async fn test_insert_unknown_article_is_foreign_key_error() {
        let repo = repo().await;
        let err = repo
            .insert(CreateCommentInput {
                article_id: 1000,
                author: "lurker".to_string(),
                body: "anyone here?".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::ForeignKey));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;

        assert!(repo.delete(1).await.unwrap());
        // Already gone
        assert!(!repo.delete(1).await.unwrap());
        assert!(!repo.delete(999).await.unwrap());
    }
}
