//! Article sources.
//!
//! An [`ArticleSource`] produces candidate articles for the feed. The
//! production implementation is [`WikipediaSource`], which talks to the
//! MediaWiki action API through a [`Fetcher`](crate::fetcher::Fetcher).

pub mod catalog;
pub mod wikipedia;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::app::Result;
use crate::domain::{Article, Topic, TopicId};

pub use catalog::default_catalog;
pub use wikipedia::WikipediaSource;

/// Upstream hard cap on list sizes.
pub const MAX_API_LIMIT: usize = 500;

/// Raw candidates requested per wanted article, to absorb image filtering.
pub const OVERFETCH_FACTOR: usize = 3;

/// One full-text search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    pub title: String,
    pub snippet: String,
}

#[async_trait]
pub trait ArticleSource {
    /// Fetch articles for the feed, biased toward one of `topics` when any
    /// are given. The returned articles are not filtered for images and
    /// their order carries no meaning.
    async fn fetch_candidates(&self, topics: &[TopicId], count: usize) -> Result<Vec<Article>>;

    /// The fixed list of topics a user can pick from.
    fn fetch_topic_catalog(&self) -> Vec<Topic>;

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>>;
}
