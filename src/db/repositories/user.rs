//! User repository

use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};

use crate::config::DatabaseDriver;
use crate::db::{DynDatabasePool, StoreResult};
use crate::models::User;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Get a user by username
    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>>;
}

/// sqlx-backed user repository
pub struct SqlxUserRepository {
    pool: DynDatabasePool,
}

impl SqlxUserRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn list(&self) -> StoreResult<Vec<User>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_by_username_sqlite(self.pool.as_sqlite().unwrap(), username).await
            }
            DatabaseDriver::Mysql => {
                get_by_username_mysql(self.pool.as_mysql().unwrap(), username).await
            }
        }
    }
}

// SQLite implementations

async fn list_sqlite(pool: &SqlitePool) -> StoreResult<Vec<User>> {
    let rows = sqlx::query("SELECT username, name, avatar_url FROM users")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .iter()
        .map(|r| User {
            username: r.get("username"),
            name: r.get("name"),
            avatar_url: r.get("avatar_url"),
        })
        .collect())
}

async fn get_by_username_sqlite(pool: &SqlitePool, username: &str) -> StoreResult<Option<User>> {
    let row = sqlx::query("SELECT username, name, avatar_url FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| User {
        username: r.get("username"),
        name: r.get("name"),
        avatar_url: r.get("avatar_url"),
    }))
}

// MySQL implementations

async fn list_mysql(pool: &MySqlPool) -> StoreResult<Vec<User>> {
    let rows = sqlx::query("SELECT username, name, avatar_url FROM users")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .iter()
        .map(|r| User {
            username: r.get("username"),
            name: r.get("name"),
            avatar_url: r.get("avatar_url"),
        })
        .collect())
}

async fn get_by_username_mysql(pool: &MySqlPool, username: &str) -> StoreResult<Option<User>> {
    let row = sqlx::query("SELECT username, name, avatar_url FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| User {
        username: r.get("username"),
        name: r.get("name"),
        avatar_url: r.get("avatar_url"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations, seed};

    async fn repo() -> SqlxUserRepository {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();
        seed::seed_sample_data(&pool).await.unwrap();
        SqlxUserRepository::new(pool)
    }

    #[tokio::test]
    async fn test_list_returns_all_users() {
        let repo = repo().await;
        let users = repo.list().await.unwrap();
        assert_eq!(users.len(), 4);
        assert!(users.iter().any(|u| u.username == "lurker"));
    }

    #[tokio::test]
    async fn test_get_by_username() {
        let repo = repo().await;

        let user = repo.get_by_username("lurker").await.unwrap();
        assert_eq!(user.unwrap().name, "Lou Reader");

        let missing = repo.get_by_username("nobody").await.unwrap();
        assert!(missing.is_none());
    }
}
