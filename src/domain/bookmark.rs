use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Article, Thumbnail};

/// A saved snapshot of an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(flatten)]
    pub article: Article,
    pub saved_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(article: Article) -> Self {
        Self {
            article,
            saved_at: Utc::now(),
        }
    }

    pub fn id(&self) -> u64 {
        self.article.id
    }
}

/// A liked article. Likes only keep enough to show a list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedArticle {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub extract: String,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    pub liked_at: DateTime<Utc>,
}

impl LikedArticle {
    pub fn new(article: &Article) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
            extract: article.extract.clone(),
            thumbnail: article.thumbnail.clone(),
            liked_at: Utc::now(),
        }
    }
}
