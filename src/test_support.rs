//! Shared fakes for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Semaphore;

use crate::app::{BrainrError, Result};
use crate::domain::{Article, Thumbnail, Topic, TopicId};
use crate::fetcher::{Fetcher, QueryParams};
use crate::source::{catalog, ArticleSource, SearchHit};

type Responder = Box<dyn Fn(&QueryParams) -> Result<Value> + Send + Sync>;

/// Fetcher answering every request through a closure and recording it.
pub struct StubFetcher {
    respond: Responder,
    calls: Mutex<Vec<QueryParams>>,
}

impl StubFetcher {
    pub fn new(respond: impl Fn(&QueryParams) -> Result<Value> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn param<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn page_id(params: &QueryParams) -> u64 {
        Self::param(params, "pageids")
            .and_then(|id| id.parse().ok())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_with(&self, key: &str, value: &str) -> Vec<QueryParams> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|params| Self::param(params, key) == Some(value))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn get_json(&self, params: &QueryParams) -> Result<Value> {
        self.calls.lock().unwrap().push(params.clone());
        (self.respond)(params)
    }
}

/// Content-by-id response for one page with a thumbnail of `width` pixels.
pub fn article_page(id: u64, width: u32) -> Value {
    json!({"query": {"pages": {id.to_string(): {
        "pageid": id,
        "ns": 0,
        "title": format!("Article {}", id),
        "extract": format!("Summary of article {}.", id),
        "fullurl": format!("https://en.wikipedia.org/wiki/Article_{}", id),
        "thumbnail": {
            "source": format!("https://upload.wikimedia.org/{}.jpg", id),
            "width": width,
            "height": 300
        }
    }}}})
}

pub fn image_article(id: u64) -> Article {
    let mut article = Article::new(id, format!("Article {}", id));
    article.extract = format!("Summary of article {}.", id);
    article.thumbnail = Some(Thumbnail {
        url: format!("https://upload.wikimedia.org/{}.jpg", id),
        width: 500,
        height: 300,
    });
    article
}

pub fn plain_article(id: u64) -> Article {
    Article::new(id, format!("Article {}", id))
}

pub fn image_articles(ids: std::ops::Range<u64>) -> Vec<Article> {
    ids.map(image_article).collect()
}

pub enum StubResponse {
    Articles(Vec<Article>),
    Fail(String),
}

/// Article source replaying scripted responses in call order.
///
/// Calls at or after `hold_from` wait for a permit from [`StubSource::release`]
/// before answering.
pub struct StubSource {
    responses: Mutex<VecDeque<StubResponse>>,
    calls: Mutex<Vec<(Vec<TopicId>, usize)>>,
    hold_from: Option<usize>,
    gate: Semaphore,
}

impl StubSource {
    pub fn new(responses: Vec<StubResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
            hold_from: None,
            gate: Semaphore::new(0),
        }
    }

    pub fn holding_from(mut self, call_index: usize) -> Self {
        self.hold_from = Some(call_index);
        self
    }

    pub fn release(&self, calls: usize) {
        self.gate.add_permits(calls);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(Vec<TopicId>, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleSource for StubSource {
    async fn fetch_candidates(&self, topics: &[TopicId], count: usize) -> Result<Vec<Article>> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((topics.to_vec(), count));
            calls.len() - 1
        };

        if self.hold_from.is_some_and(|from| index >= from) {
            let permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| BrainrError::Other(e.to_string()))?;
            permit.forget();
        }

        let response = self.responses.lock().unwrap().pop_front();
        match response {
            Some(StubResponse::Articles(articles)) => Ok(articles),
            Some(StubResponse::Fail(message)) => Err(BrainrError::Other(message)),
            None => Ok(Vec::new()),
        }
    }

    fn fetch_topic_catalog(&self) -> Vec<Topic> {
        catalog::default_catalog()
    }

    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchHit>> {
        Ok(Vec::new())
    }
}
