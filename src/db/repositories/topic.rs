//! Topic repository

use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};

use crate::config::DatabaseDriver;
use crate::db::{DynDatabasePool, StoreResult};
use crate::models::Topic;

/// Topic repository trait
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// List all topics, unsorted
    async fn list(&self) -> StoreResult<Vec<Topic>>;

    /// Check whether a topic slug exists
    async fn exists(&self, slug: &str) -> StoreResult<bool>;
}

/// sqlx-backed topic repository
pub struct SqlxTopicRepository {
    pool: DynDatabasePool,
}

impl SqlxTopicRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for SqlxTopicRepository {
    async fn list(&self) -> StoreResult<Vec<Topic>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn exists(&self, slug: &str) -> StoreResult<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => exists_sqlite(self.pool.as_sqlite().unwrap(), slug).await,
            DatabaseDriver::Mysql => exists_mysql(self.pool.as_mysql().unwrap(), slug).await,
        }
    }
}

// SQLite implementations

async fn list_sqlite(pool: &SqlitePool) -> StoreResult<Vec<Topic>> {
    let rows = sqlx::query("SELECT slug, description FROM topics")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .iter()
        .map(|r| Topic {
            slug: r.get("slug"),
            description: r.get("description"),
        })
        .collect())
}

async fn exists_sqlite(pool: &SqlitePool, slug: &str) -> StoreResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics WHERE slug = ?")
        .bind(slug)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

// MySQL implementations

async fn list_mysql(pool: &MySqlPool) -> StoreResult<Vec<Topic>> {
    let rows = sqlx::query("SELECT slug, description FROM topics")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .iter()
        .map(|r| Topic {
            slug: r.get("slug"),
            description: r.get("description"),
        })
        .collect())
}

async fn exists_mysql(pool: &MySqlPool, slug: &str) -> StoreResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics WHERE slug = ?")
        .bind(slug)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations, seed};

    async fn repo() -> SqlxTopicRepository {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();
        seed::seed_sample_data(&pool).await.unwrap();
        SqlxTopicRepository::new(pool)
    }

    #[tokio::test]
    async fn test_list_returns_all_topics() {
        let repo = repo().await;
        let topics = repo.list().await.unwrap();
        assert_eq!(topics.len(), 3);
        assert!(topics.iter().any(|t| t.slug == "coding"));
        assert!(topics.iter().all(|t| !t.description.is_empty()));
    }

    #[tokio::test]
    async fn test_exists() {
        let repo = repo().await;
        assert!(repo.exists("coding").await.unwrap());
        assert!(!repo.exists("gardening").await.unwrap());
    }
}
