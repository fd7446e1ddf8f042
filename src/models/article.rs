//! Article model
//!
//! Articles carry a derived `comment_count` aggregated at query time; it is
//! never stored on the row itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article entity as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub article_id: i64,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub author: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    /// Number of comments on this article, aggregated at query time.
    pub comment_count: i64,
}

/// Sortable columns for the article listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    CreatedAt,
    Votes,
    Title,
    ArticleId,
    Author,
    Topic,
    CommentCount,
}

impl SortColumn {
    /// SQL expression this column sorts on. Values are fixed strings, never
    /// caller input, so they are safe to splice into a query.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::CreatedAt => "a.created_at",
            Self::Votes => "a.votes",
            Self::Title => "a.title",
            Self::ArticleId => "a.article_id",
            Self::Author => "a.author",
            Self::Topic => "a.topic",
            Self::CommentCount => "comment_count",
        }
    }
}

impl std::str::FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "votes" => Ok(Self::Votes),
            "title" => Ok(Self::Title),
            "article_id" => Ok(Self::ArticleId),
            "author" => Ok(Self::Author),
            "topic" => Ok(Self::Topic),
            "comment_count" => Ok(Self::CommentCount),
            _ => Err(format!("Invalid sort column: {}", s)),
        }
    }
}

/// Sort direction for the article listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Validated query parameters for the article listing.
#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    pub sort_by: SortColumn,
    pub order: SortOrder,
    pub topic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_parses_whitelist() {
        assert_eq!("created_at".parse::<SortColumn>(), Ok(SortColumn::CreatedAt));
        assert_eq!("votes".parse::<SortColumn>(), Ok(SortColumn::Votes));
        assert_eq!(
            "comment_count".parse::<SortColumn>(),
            Ok(SortColumn::CommentCount)
        );
        assert!("votes; DROP TABLE articles".parse::<SortColumn>().is_err());
        assert!("".parse::<SortColumn>().is_err());
    }

    #[test]
    fn test_sort_order_parses_whitelist() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_defaults_are_created_at_desc() {
        let query = ArticleQuery::default();
        assert_eq!(query.sort_by, SortColumn::CreatedAt);
        assert_eq!(query.order, SortOrder::Desc);
        assert!(query.topic.is_none());
    }
}
