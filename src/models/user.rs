//! User model

use serde::{Deserialize, Serialize};

/// An account identified by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}
