use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use html_escape::decode_html_entities;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::app::{BrainrError, Result};
use crate::config::ApiConfig;
use crate::domain::topic::category_title;
use crate::domain::{Article, Thumbnail, Topic, TopicId};
use crate::fetcher::{Fetcher, QueryParams};
use crate::source::{catalog, ArticleSource, SearchHit, MAX_API_LIMIT, OVERFETCH_FACTOR};

/// A page reference returned by a listing, before its content is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    id: u64,
    title: String,
}

pub struct WikipediaSource {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    rng: Mutex<StdRng>,
    max_concurrency: usize,
    thumbnail_size: u32,
}

impl WikipediaSource {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, config: &ApiConfig) -> Self {
        Self::with_rng(fetcher, config, StdRng::from_entropy())
    }

    pub fn with_rng(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        config: &ApiConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            fetcher,
            rng: Mutex::new(rng),
            max_concurrency: config.max_concurrency.max(1),
            thumbnail_size: config.thumbnail_size,
        }
    }

    fn pick_topic(&self, topics: &[TopicId]) -> Option<TopicId> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        topics.choose(&mut *rng).cloned()
    }

    fn shuffle(&self, candidates: &mut [Candidate]) {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        candidates.shuffle(&mut *rng);
    }

    async fn list_random(&self, limit: usize) -> Result<Vec<Candidate>> {
        let params: QueryParams = vec![
            ("action", "query".to_string()),
            ("list", "random".to_string()),
            ("rnlimit", limit.to_string()),
            ("rnnamespace", "0".to_string()),
        ];
        let body = self.fetcher.get_json(&params).await?;
        Ok(parse_random_listing(&body))
    }

    async fn list_category(&self, topic: &str, limit: usize) -> Result<Vec<Candidate>> {
        let params: QueryParams = vec![
            ("action", "query".to_string()),
            ("generator", "categorymembers".to_string()),
            ("gcmtitle", category_title(topic)),
            ("gcmlimit", limit.to_string()),
            ("gcmnamespace", "0".to_string()),
            ("prop", "info".to_string()),
            ("inprop", "url".to_string()),
        ];
        let body = self.fetcher.get_json(&params).await?;
        let mut candidates = parse_page_listing(&body);
        self.shuffle(&mut candidates);
        Ok(candidates)
    }

    async fn list_candidates(&self, topics: &[TopicId], limit: usize) -> Result<Vec<Candidate>> {
        if let Some(topic) = self.pick_topic(topics) {
            debug!("Fetching articles for topic {}", topic);
            let candidates = self.list_category(&topic, limit).await?;
            if !candidates.is_empty() {
                return Ok(candidates);
            }
            info!("Topic {} returned no articles, falling back to random", topic);
        }

        self.list_random(limit).await
    }

    async fn resolve(&self, id: u64) -> Result<Option<Article>> {
        let params: QueryParams = vec![
            ("action", "query".to_string()),
            ("prop", "extracts|pageimages|info".to_string()),
            ("pageids", id.to_string()),
            ("exintro", "1".to_string()),
            ("explaintext", "1".to_string()),
            ("pithumbsize", self.thumbnail_size.to_string()),
            ("inprop", "url".to_string()),
        ];
        let body = self.fetcher.get_json(&params).await?;
        Ok(parse_article(&body, id))
    }

    /// Resolve every candidate concurrently. Individual failures are
    /// dropped; the call only fails when nothing could be resolved because
    /// every lookup failed.
    async fn resolve_all(&self, candidates: Vec<Candidate>) -> Result<Vec<Article>> {
        let total = candidates.len();

        let results: Vec<(Candidate, Result<Option<Article>>)> = stream::iter(candidates)
            .map(|candidate| async move {
                let result = self.resolve(candidate.id).await;
                (candidate, result)
            })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let mut articles = Vec::with_capacity(total);
        let mut first_error = None;
        let mut failures = 0;

        for (candidate, result) in results {
            match result {
                Ok(Some(article)) => articles.push(article),
                Ok(None) => debug!("Page {} ({}) has no content", candidate.id, candidate.title),
                Err(e) => {
                    warn!("Failed to resolve page {} ({}): {}", candidate.id, candidate.title, e);
                    failures += 1;
                    first_error.get_or_insert(e);
                }
            }
        }

        if articles.is_empty() && failures == total {
            if let Some(e) = first_error {
                return Err(e);
            }
        }

        Ok(articles)
    }
}

#[async_trait]
impl ArticleSource for WikipediaSource {
    async fn fetch_candidates(&self, topics: &[TopicId], count: usize) -> Result<Vec<Article>> {
        let limit = count.saturating_mul(OVERFETCH_FACTOR).clamp(1, MAX_API_LIMIT);
        let candidates = self.list_candidates(topics, limit).await?;
        debug!("Resolving {} candidates", candidates.len());

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        self.resolve_all(candidates).await
    }

    fn fetch_topic_catalog(&self) -> Vec<Topic> {
        catalog::default_catalog()
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(BrainrError::Other("Search query is empty".into()));
        }

        let params: QueryParams = vec![
            ("action", "query".to_string()),
            ("list", "search".to_string()),
            ("srsearch", query.to_string()),
            ("srlimit", limit.clamp(1, MAX_API_LIMIT).to_string()),
        ];
        let body = self.fetcher.get_json(&params).await?;
        Ok(parse_search(&body))
    }
}

fn parse_random_listing(body: &Value) -> Vec<Candidate> {
    body.pointer("/query/random")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    Some(Candidate {
                        id: entry.get("id")?.as_u64()?,
                        title: string_field(entry, "title"),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_page_listing(body: &Value) -> Vec<Candidate> {
    body.pointer("/query/pages")
        .and_then(Value::as_object)
        .map(|pages| {
            pages
                .values()
                .filter_map(|page| {
                    Some(Candidate {
                        id: page.get("pageid")?.as_u64()?,
                        title: string_field(page, "title"),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_article(body: &Value, id: u64) -> Option<Article> {
    let page = body.pointer("/query/pages")?.get(id.to_string())?;
    if page.get("missing").is_some() || page.get("invalid").is_some() {
        return None;
    }

    let thumbnail = page.get("thumbnail").and_then(|thumb| {
        Some(Thumbnail {
            url: thumb.get("source")?.as_str()?.to_string(),
            width: thumb.get("width")?.as_u64()?.try_into().ok()?,
            height: thumb.get("height")?.as_u64()?.try_into().ok()?,
        })
    });

    Some(Article {
        id: page.get("pageid").and_then(Value::as_u64).unwrap_or(id),
        title: string_field(page, "title"),
        extract: string_field(page, "extract"),
        thumbnail,
        canonical_url: page
            .get("fullurl")
            .and_then(Value::as_str)
            .map(String::from),
    })
}

fn parse_search(body: &Value) -> Vec<SearchHit> {
    body.pointer("/query/search")
        .and_then(Value::as_array)
        .map(|hits| {
            hits.iter()
                .filter_map(|hit| {
                    Some(SearchHit {
                        id: hit.get("pageid")?.as_u64()?,
                        title: string_field(hit, "title"),
                        snippet: strip_markup(&string_field(hit, "snippet")),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Drop tags from a search snippet and decode its entities.
fn strip_markup(snippet: &str) -> String {
    let mut text = String::with_capacity(snippet.len());
    let mut in_tag = false;
    for c in snippet.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    decode_html_entities(&text).to_string()
}
