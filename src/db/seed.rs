//! Sample dataset
//!
//! Seeds the database with a small news/discussion dataset: topics, users,
//! articles, and comments. Endpoint tests load this fixture into an
//! in-memory SQLite database; the `demo` feature loads it at startup so a
//! fresh install has something to serve.
//!
//! Seeding is destructive: existing rows are cleared first so repeated runs
//! produce the same dataset with the same generated ids.

use anyhow::Result;
use chrono::{Duration, Utc};
use sqlx::{MySqlPool, SqlitePool};

use super::DynDatabasePool;
use crate::config::DatabaseDriver;

const TOPICS: &[(&str, &str)] = &[
    ("coding", "All things code"),
    ("football", "The beautiful game"),
    ("cooking", "Recipes and kitchen talk"),
];

const USERS: &[(&str, &str, &str)] = &[
    (
        "lurker",
        "Lou Reader",
        "https://avatars.example.com/lurker.png",
    ),
    (
        "scribbler",
        "Sam Scribble",
        "https://avatars.example.com/scribbler.png",
    ),
    (
        "deskchief",
        "Dana Chief",
        "https://avatars.example.com/deskchief.png",
    ),
    (
        "hotwire",
        "Harri Wire",
        "https://avatars.example.com/hotwire.png",
    ),
];

/// (title, body, topic, author, votes, age in days)
///
/// Articles are inserted oldest-age-last so article_id 1 is also the most
/// recently created; the default listing order matches id order.
const ARTICLES: &[(&str, &str, &str, &str, i64, i64)] = &[
    (
        "Borrow checker diaries",
        "Week four: the borrow checker and I are finally on speaking terms.",
        "coding",
        "scribbler",
        100,
        1,
    ),
    (
        "Offside, explained",
        "It is not where you stand, it is when the ball leaves the boot.",
        "football",
        "deskchief",
        0,
        2,
    ),
    (
        "Sourdough under pressure",
        "A starter neglected for a month can still be coaxed back to life.",
        "cooking",
        "hotwire",
        5,
        3,
    ),
    (
        "Async without tears",
        "Structured concurrency is mostly about deciding who owns the task.",
        "coding",
        "scribbler",
        12,
        4,
    ),
    (
        "Set pieces win titles",
        "Corners are the closest thing football has to a free lunch.",
        "football",
        "deskchief",
        3,
        5,
    ),
];

/// (article_id, author, body, votes, age in hours)
const COMMENTS: &[(i64, &str, &str, i64, i64)] = &[
    (1, "lurker", "First time commenting, long time lurking.", 2, 2),
    (1, "hotwire", "The borrow checker never apologises.", 0, 5),
    (1, "deskchief", "Filed under: growth.", 16, 30),
    (3, "scribbler", "Mine survived a whole summer in the fridge.", 4, 12),
    (4, "lurker", "Who owns the task indeed.", 1, 8),
];

/// Load the sample dataset, replacing any existing rows.
pub async fn seed_sample_data(pool: &DynDatabasePool) -> Result<()> {
    match pool.driver() {
        DatabaseDriver::Sqlite => seed_sqlite(pool.as_sqlite().unwrap()).await,
        DatabaseDriver::Mysql => seed_mysql(pool.as_mysql().unwrap()).await,
    }
}

async fn seed_sqlite(pool: &SqlitePool) -> Result<()> {
    // Clear in dependency order so foreign keys never trip.
    for table in ["comments", "articles", "users", "topics"] {
        sqlx::query(&format!("DELETE FROM {}", table))
            .execute(pool)
            .await?;
    }
    // Reset autoincrement counters so reseeding yields the same ids.
    sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('articles', 'comments')")
        .execute(pool)
        .await
        .ok();

    for (slug, description) in TOPICS {
        sqlx::query("INSERT INTO topics (slug, description) VALUES (?, ?)")
            .bind(*slug)
            .bind(*description)
            .execute(pool)
            .await?;
    }

    for (username, name, avatar_url) in USERS {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES (?, ?, ?)")
            .bind(*username)
            .bind(*name)
            .bind(*avatar_url)
            .execute(pool)
            .await?;
    }

    let now = Utc::now();
    for (title, body, topic, author, votes, age_days) in ARTICLES {
        sqlx::query(
            "INSERT INTO articles (title, body, topic, author, votes, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(*title)
        .bind(*body)
        .bind(*topic)
        .bind(*author)
        .bind(*votes)
        .bind(now - Duration::days(*age_days))
        .execute(pool)
        .await?;
    }

    for (article_id, author, body, votes, age_hours) in COMMENTS {
        sqlx::query(
            "INSERT INTO comments (body, article_id, author, votes, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(*body)
        .bind(*article_id)
        .bind(*author)
        .bind(*votes)
        .bind(now - Duration::hours(*age_hours))
        .execute(pool)
        .await?;
    }

    Ok(())
}

async fn seed_mysql(pool: &MySqlPool) -> Result<()> {
    for table in ["comments", "articles", "users", "topics"] {
        sqlx::query(&format!("DELETE FROM {}", table))
            .execute(pool)
            .await?;
    }
    for table in ["articles", "comments"] {
        sqlx::query(&format!("ALTER TABLE {} AUTO_INCREMENT = 1", table))
            .execute(pool)
            .await
            .ok();
    }

    for (slug, description) in TOPICS {
        sqlx::query("INSERT INTO topics (slug, description) VALUES (?, ?)")
            .bind(*slug)
            .bind(*description)
            .execute(pool)
            .await?;
    }

    for (username, name, avatar_url) in USERS {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES (?, ?, ?)")
            .bind(*username)
            .bind(*name)
            .bind(*avatar_url)
            .execute(pool)
            .await?;
    }

    let now = Utc::now();
    for (title, body, topic, author, votes, age_days) in ARTICLES {
        sqlx::query(
            "INSERT INTO articles (title, body, topic, author, votes, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(*title)
        .bind(*body)
        .bind(*topic)
        .bind(*author)
        .bind(*votes)
        .bind(now - Duration::days(*age_days))
        .execute(pool)
        .await?;
    }

    for (article_id, author, body, votes, age_hours) in COMMENTS {
        sqlx::query(
            "INSERT INTO comments (body, article_id, author, votes, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(*body)
        .bind(*article_id)
        .bind(*author)
        .bind(*votes)
        .bind(now - Duration::hours(*age_hours))
        .execute(pool)
        .await?;
    }

    Ok(())
}
