//! Article repository
//!
//! Listing and single-article reads both aggregate `comment_count` at query
//! time with a LEFT JOIN, so articles without comments report zero rather
//! than disappearing from the result.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};

use crate::config::DatabaseDriver;
use crate::db::{DynDatabasePool, StoreResult};
use crate::models::{Article, ArticleQuery};

const ARTICLE_SELECT: &str = "SELECT a.article_id, a.title, a.body, a.topic, a.author, \
     a.votes, a.created_at, COUNT(c.comment_id) AS comment_count \
     FROM articles a \
     LEFT JOIN comments c ON c.article_id = a.article_id";

/// Article repository trait
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// List articles with comment counts, sorted and filtered per `query`
    async fn list(&self, query: &ArticleQuery) -> StoreResult<Vec<Article>>;

    /// Get a single article by id, with its comment count
    async fn get_by_id(&self, article_id: i64) -> StoreResult<Option<Article>>;

    /// Check whether an article exists
    async fn exists(&self, article_id: i64) -> StoreResult<bool>;

    /// Adjust an article's votes by `delta` (clamped at zero) and return the
    /// updated row
    async fn update_votes(&self, article_id: i64, delta: i64) -> StoreResult<Option<Article>>;
}

/// sqlx-backed article repository
pub struct SqlxArticleRepository {
    pool: DynDatabasePool,
}

impl SqlxArticleRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for SqlxArticleRepository {
    async fn list(&self, query: &ArticleQuery) -> StoreResult<Vec<Article>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_sqlite(self.pool.as_sqlite().unwrap(), query).await,
            DatabaseDriver::Mysql => list_mysql(self.pool.as_mysql().unwrap(), query).await,
        }
    }

    async fn get_by_id(&self, article_id: i64) -> StoreResult<Option<Article>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_by_id_sqlite(self.pool.as_sqlite().unwrap(), article_id).await
            }
            DatabaseDriver::Mysql => {
                get_by_id_mysql(self.pool.as_mysql().unwrap(), article_id).await
            }
        }
    }

    async fn exists(&self, article_id: i64) -> StoreResult<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                exists_sqlite(self.pool.as_sqlite().unwrap(), article_id).await
            }
            DatabaseDriver::Mysql => exists_mysql(self.pool.as_mysql().unwrap(), article_id).await,
        }
    }

    async fn update_votes(&self, article_id: i64, delta: i64) -> StoreResult<Option<Article>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                update_votes_sqlite(self.pool.as_sqlite().unwrap(), article_id, delta).await
            }
            DatabaseDriver::Mysql => {
                update_votes_mysql(self.pool.as_mysql().unwrap(), article_id, delta).await
            }
        }
    }
}

/// Assemble the listing query. `sort_by`/`order` come from a fixed whitelist
/// in the model layer; only the topic filter is bound as a parameter.
fn list_query(query: &ArticleQuery) -> String {
    let mut sql = String::from(ARTICLE_SELECT);
    if query.topic.is_some() {
        sql.push_str(" WHERE a.topic = ?");
    }
    sql.push_str(" GROUP BY a.article_id ORDER BY ");
    sql.push_str(query.sort_by.as_sql());
    sql.push(' ');
    sql.push_str(query.order.as_sql());
    sql
}

// SQLite implementations

fn article_from_sqlite_row(r: &sqlx::sqlite::SqliteRow) -> Article {
    Article {
        article_id: r.get("article_id"),
        title: r.get("title"),
        body: r.get("body"),
        topic: r.get("topic"),
        author: r.get("author"),
        votes: r.get("votes"),
        created_at: r.get("created_at"),
        comment_count: r.get("comment_count"),
    }
}

async fn list_sqlite(pool: &SqlitePool, query: &ArticleQuery) -> StoreResult<Vec<Article>> {
    let sql = list_query(query);
    let mut q = sqlx::query(&sql);
    if let Some(topic) = &query.topic {
        q = q.bind(topic);
    }
    let rows = q.fetch_all(pool).await?;
    Ok(rows.iter().map(article_from_sqlite_row).collect())
}

async fn get_by_id_sqlite(pool: &SqlitePool, article_id: i64) -> StoreResult<Option<Article>> {
    let sql = format!(
        "{} WHERE a.article_id = ? GROUP BY a.article_id",
        ARTICLE_SELECT
    );
    let row = sqlx::query(&sql)
        .bind(article_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(article_from_sqlite_row))
}

async fn exists_sqlite(pool: &SqlitePool, article_id: i64) -> StoreResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE article_id = ?")
        .bind(article_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

async fn update_votes_sqlite(
    pool: &SqlitePool,
    article_id: i64,
    delta: i64,
) -> StoreResult<Option<Article>> {
    sqlx::query("UPDATE articles SET votes = MAX(0, votes + ?) WHERE article_id = ?")
        .bind(delta)
        .bind(article_id)
        .execute(pool)
        .await?;

    // A missing article matches zero rows; the re-read settles existence.
    // (MySQL reports zero affected rows for a same-value update, so
    // rows_affected cannot.)
    get_by_id_sqlite(pool, article_id).await
}

// MySQL implementations

fn article_from_mysql_row(r: &sqlx::mysql::MySqlRow) -> Article {
    Article {
        article_id: r.get("article_id"),
        title: r.get("title"),
        body: r.get("body"),
        topic: r.get("topic"),
        author: r.get("author"),
        votes: r.get("votes"),
        created_at: r.get("created_at"),
        comment_count: r.get("comment_count"),
    }
}

async fn list_mysql(pool: &MySqlPool, query: &ArticleQuery) -> StoreResult<Vec<Article>> {
    let sql = list_query(query);
    let mut q = sqlx::query(&sql);
    if let Some(topic) = &query.topic {
        q = q.bind(topic);
    }
    let rows = q.fetch_all(pool).await?;
    Ok(rows.iter().map(article_from_mysql_row).collect())
}

async fn get_by_id_mysql(pool: &MySqlPool, article_id: i64) -> StoreResult<Option<Article>> {
    let sql = format!(
        "{} WHERE a.article_id = ? GROUP BY a.article_id",
        ARTICLE_SELECT
    );
    let row = sqlx::query(&sql)
        .bind(article_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(article_from_mysql_row))
}

async fn exists_mysql(pool: &MySqlPool, article_id: i64) -> StoreResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE article_id = ?")
        .bind(article_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

async fn update_votes_mysql(
    pool: &MySqlPool,
    article_id: i64,
    delta: i64,
) -> StoreResult<Option<Article>> {
    sqlx::query("UPDATE articles SET votes = GREATEST(0, votes + ?) WHERE article_id = ?")
        .bind(delta)
        .bind(article_id)
        .execute(pool)
        .await?;

    get_by_id_mysql(pool, article_id).await
}
