use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A book record, keyed by ISBN
///
/// Only the ISBN means anything to the store. Fields other than the ones
/// named here are kept as-is and written back out on reads. A missing or
/// `null` title or author is always written back as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    /// Create a book with only an ISBN
    pub fn new(isbn: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            title: None,
            author: None,
            extra: Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}
