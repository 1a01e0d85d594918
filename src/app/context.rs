use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{BrainrError, Result};
use crate::config::Config;
use crate::feed::FeedBuffer;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::source::{ArticleSource, WikipediaSource};
use crate::store::{KeyValueStore, MemoryKvStore, PreferenceStore, SqliteKvStore};

pub struct AppContext {
    pub config: Arc<Config>,
    pub prefs: PreferenceStore,
    pub source: Arc<dyn ArticleSource + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store: Arc<dyn KeyValueStore + Send + Sync> = Arc::new(SqliteKvStore::new(&db_path)?);
        Self::with_store(config, store)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryKvStore::new()))
    }

    fn with_store(config: Config, store: Arc<dyn KeyValueStore + Send + Sync>) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.api)?);
        let source: Arc<dyn ArticleSource + Send + Sync> =
            Arc::new(WikipediaSource::new(fetcher, &config.api));

        Ok(Self {
            config: Arc::new(config),
            prefs: PreferenceStore::new(store),
            source,
        })
    }

    /// A fresh feed buffer over this context's article source.
    pub fn feed_buffer(&self) -> FeedBuffer {
        FeedBuffer::new(self.source.clone(), self.config.feed.clone())
    }

    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| BrainrError::Config("Could not find data directory".into()))?;
        let brainr_dir = data_dir.join("brainr");
        std::fs::create_dir_all(&brainr_dir)?;
        Ok(brainr_dir)
    }

    fn default_db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("brainr.db"))
    }
}
