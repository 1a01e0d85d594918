use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info, warn};

use crate::app::FeedError;
use crate::config::FeedConfig;
use crate::domain::{Article, TopicId};
use crate::feed::event::FeedEvent;
use crate::feed::filter::has_usable_image;
use crate::feed::window::FeedWindow;
use crate::source::ArticleSource;

type SharedSource = Arc<dyn ArticleSource + Send + Sync>;
type FetchResult = std::result::Result<Vec<Article>, FeedError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Empty,
    /// The initial fetch is in flight.
    Loading,
    Ready,
    /// The reader reached the end and no more articles arrived in time.
    Exhausted,
    /// The initial fetch failed; retry with [`FeedBuffer::initialize`].
    Failed(FeedError),
}

/// A background fetch for the next batch, tagged with the session it was
/// started for.
struct Refill {
    generation: u64,
    handle: JoinHandle<FetchResult>,
}

/// Prefetching cursor over fetched articles.
///
/// Navigation takes `&mut self`, so calls are applied strictly in the order
/// they are made. At most one refill runs at a time; its result is only
/// ever merged into the window at an [`advance`](Self::advance) boundary.
pub struct FeedBuffer {
    source: SharedSource,
    config: FeedConfig,
    topics: Vec<TopicId>,
    window: FeedWindow,
    state: FeedState,
    refill: Option<Refill>,
    generation: u64,
}

impl FeedBuffer {
    pub fn new(source: SharedSource, config: FeedConfig) -> Self {
        Self {
            source,
            config,
            topics: Vec::new(),
            window: FeedWindow::default(),
            state: FeedState::Empty,
            refill: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn window(&self) -> &FeedWindow {
        &self.window
    }

    pub fn topics(&self) -> &[TopicId] {
        &self.topics
    }

    /// Articles loaded in this session.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// 1-based position of the current article and the loaded count.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current()
            .map(|_| (self.window.cursor() + 1, self.window.len()))
    }

    pub fn is_refilling(&self) -> bool {
        self.refill.is_some()
    }

    /// Start a new session: drop everything from the previous one, fetch the
    /// first batch and kick off a background refill.
    pub async fn initialize(&mut self, topics: Vec<TopicId>) -> Result<(), FeedError> {
        self.cancel_refill();
        self.generation += 1;
        self.topics = topics;
        self.window = FeedWindow::default();
        self.state = FeedState::Loading;

        let result = fetch_usable(
            self.source.clone(),
            self.topics.clone(),
            self.config.initial_batch,
            self.config.fetch_timeout(),
        )
        .await;

        match result {
            Ok(articles) if !articles.is_empty() => {
                info!("Feed ready with {} articles", articles.len());
                self.window = FeedWindow::new(articles);
                self.state = FeedState::Ready;
                self.spawn_refill();
                Ok(())
            }
            Ok(_) => {
                warn!("Initial fetch returned no usable articles");
                self.state = FeedState::Failed(FeedError::EmptyResult);
                Err(FeedError::EmptyResult)
            }
            Err(e) => {
                warn!("Initial fetch failed: {}", e);
                self.state = FeedState::Failed(e.clone());
                Err(e)
            }
        }
    }

    pub fn current(&self) -> Option<&Article> {
        match self.state {
            FeedState::Ready => self.window.current(),
            _ => None,
        }
    }

    /// Move to the next article. Returns whether the cursor moved.
    pub async fn advance(&mut self) -> bool {
        if self.state != FeedState::Ready {
            return false;
        }

        self.collect_refill();

        if self.window.step_forward() {
            self.prefetch_if_low();
            return true;
        }

        if self.window.pending().is_empty() && self.refill.is_some() {
            debug!("At the end of the feed, waiting for refill");
            self.await_refill().await;
        }

        if self.window.merge_pending() {
            debug!("Merged preloaded articles, feed now has {}", self.window.len());
            self.spawn_refill();
            true
        } else {
            info!("Feed exhausted at {} articles", self.window.len());
            self.state = FeedState::Exhausted;
            false
        }
    }

    /// Move to the previous article. Returns whether the cursor moved.
    pub fn retreat(&mut self) -> bool {
        if self.state != FeedState::Ready {
            return false;
        }
        self.window.step_back()
    }

    pub async fn dispatch(&mut self, event: FeedEvent) -> Result<bool, FeedError> {
        match event {
            FeedEvent::Advance => Ok(self.advance().await),
            FeedEvent::Retreat => Ok(self.retreat()),
            FeedEvent::Reload => {
                let topics = self.topics.clone();
                self.initialize(topics).await.map(|_| true)
            }
        }
    }

    /// Wait for the outstanding refill, if any, and stash its articles in the
    /// pending batch. Gives up after the fetch timeout.
    pub async fn await_refill(&mut self) {
        let Some(mut refill) = self.refill.take() else {
            return;
        };

        let timeout = self.config.fetch_timeout();
        match tokio::time::timeout(timeout, &mut refill.handle).await {
            Ok(joined) => self.apply_refill(refill.generation, joined),
            Err(_) => {
                warn!("Refill did not finish within {:?}", timeout);
                refill.handle.abort();
            }
        }
    }

    /// Pick up a finished refill without waiting.
    pub fn collect_refill(&mut self) {
        let finished = self
            .refill
            .as_ref()
            .is_some_and(|refill| refill.handle.is_finished());
        if !finished {
            return;
        }

        if let Some(refill) = self.refill.take() {
            let generation = refill.generation;
            match refill.handle.now_or_never() {
                Some(joined) => self.apply_refill(generation, joined),
                None => warn!("Finished refill was not ready"),
            }
        }
    }

    fn apply_refill(&mut self, generation: u64, joined: Result<FetchResult, JoinError>) {
        if generation != self.generation {
            debug!("Discarding refill from an earlier session");
            return;
        }

        match joined {
            Ok(Ok(articles)) => {
                let added = self.window.extend_pending(articles);
                debug!("Refill preloaded {} articles", added);
            }
            Ok(Err(e)) => warn!("Refill failed: {}", e),
            Err(e) if e.is_cancelled() => debug!("Refill cancelled"),
            Err(e) => error!("Refill task failed: {}", e),
        }
    }

    fn prefetch_if_low(&mut self) {
        if self.window.remaining() <= self.config.prefetch_threshold
            && self.window.pending().is_empty()
        {
            self.spawn_refill();
        }
    }

    fn spawn_refill(&mut self) {
        if self.refill.is_some() {
            return;
        }

        let source = self.source.clone();
        let topics = self.topics.clone();
        let count = self.config.refill_batch;
        let timeout = self.config.fetch_timeout();

        debug!("Starting refill of {} articles", count);
        let handle = tokio::spawn(fetch_usable(source, topics, count, timeout));
        self.refill = Some(Refill {
            generation: self.generation,
            handle,
        });
    }

    fn cancel_refill(&mut self) {
        if let Some(refill) = self.refill.take() {
            refill.handle.abort();
        }
    }
}

impl Drop for FeedBuffer {
    fn drop(&mut self) {
        self.cancel_refill();
    }
}

/// Fetch `count` articles with usable images, bounded by `timeout`.
async fn fetch_usable(
    source: SharedSource,
    topics: Vec<TopicId>,
    count: usize,
    timeout: Duration,
) -> FetchResult {
    let fetched = tokio::time::timeout(timeout, source.fetch_candidates(&topics, count))
        .await
        .map_err(|_| FeedError::Timeout(timeout))?
        .map_err(|e| FeedError::from_brainr(&e))?;

    let total = fetched.len();
    let usable: Vec<Article> = fetched
        .into_iter()
        .filter(has_usable_image)
        .take(count)
        .collect();

    if usable.len() < count {
        debug!(
            "Only {} of {} requested articles have images ({} fetched)",
            usable.len(),
            count,
            total
        );
    }

    Ok(usable)
}
