//! Topic model

use serde::{Deserialize, Serialize};

/// A discussion category identified by a unique slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}
