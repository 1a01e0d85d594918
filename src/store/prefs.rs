//! Typed user preferences on top of a [`KeyValueStore`].
//!
//! Reads never fail: a store error or an unreadable value is logged and the
//! default is returned. Writes report their errors to the caller.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app::{BrainrError, Result};
use crate::domain::{Article, Bookmark, LikedArticle, Theme, TopicId};
use crate::store::KeyValueStore;

pub const THEME_KEY: &str = "brainr_theme";
pub const TOPICS_KEY: &str = "brainr_topics";
pub const BOOKMARKS_KEY: &str = "brainr_bookmarks";
pub const ONBOARDING_KEY: &str = "brainr_onboarding_completed";
pub const LIKED_KEY: &str = "brainr_liked_articles";

pub const ALL_KEYS: [&str; 5] = [THEME_KEY, TOPICS_KEY, BOOKMARKS_KEY, ONBOARDING_KEY, LIKED_KEY];

type LikedMap = BTreeMap<u64, LikedArticle>;

#[derive(Clone)]
pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore + Send + Sync>,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        Self { store }
    }

    pub fn theme(&self) -> Theme {
        match self.read_raw(THEME_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored theme {:?}: {}", raw, e);
                Theme::default()
            }),
            None => Theme::default(),
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Flip the stored theme and return the new one.
    pub fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.theme().toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    pub fn topics(&self) -> Vec<TopicId> {
        self.read_json(TOPICS_KEY).unwrap_or_default()
    }

    /// Replace the stored topics. Duplicates are dropped, first occurrence wins.
    pub fn set_topics(&self, topics: &[TopicId]) -> Result<()> {
        let mut unique: Vec<TopicId> = Vec::with_capacity(topics.len());
        for topic in topics {
            if !unique.contains(topic) {
                unique.push(topic.clone());
            }
        }
        self.write_json(TOPICS_KEY, &unique)
    }

    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.read_json(BOOKMARKS_KEY).unwrap_or_default()
    }

    pub fn is_bookmarked(&self, id: u64) -> bool {
        self.bookmarks().iter().any(|b| b.id() == id)
    }

    /// Save `article`. Adding an already saved article keeps the first
    /// snapshot and returns `false`.
    pub fn add_bookmark(&self, article: &Article) -> Result<bool> {
        let mut bookmarks = self.bookmarks();
        if bookmarks.iter().any(|b| b.id() == article.id) {
            return Ok(false);
        }
        bookmarks.push(Bookmark::new(article.clone()));
        self.write_json(BOOKMARKS_KEY, &bookmarks)?;
        Ok(true)
    }

    pub fn remove_bookmark(&self, id: u64) -> Result<()> {
        let mut bookmarks = self.bookmarks();
        let before = bookmarks.len();
        bookmarks.retain(|b| b.id() != id);
        if bookmarks.len() == before {
            return Err(BrainrError::BookmarkNotFound(id));
        }
        self.write_json(BOOKMARKS_KEY, &bookmarks)
    }

    /// Returns whether the article is bookmarked afterwards.
    pub fn toggle_bookmark(&self, article: &Article) -> Result<bool> {
        if self.is_bookmarked(article.id) {
            self.remove_bookmark(article.id)?;
            Ok(false)
        } else {
            self.add_bookmark(article)?;
            Ok(true)
        }
    }

    /// Liked articles, most recent first.
    pub fn liked_articles(&self) -> Vec<LikedArticle> {
        let mut liked: Vec<LikedArticle> = self.liked_map().into_values().collect();
        liked.sort_by(|a, b| b.liked_at.cmp(&a.liked_at));
        liked
    }

    pub fn is_liked(&self, id: u64) -> bool {
        self.liked_map().contains_key(&id)
    }

    /// Record `article` as liked or not. Setting the state it already has
    /// keeps the stored record.
    pub fn set_liked(&self, article: &Article, liked: bool) -> Result<()> {
        let mut liked_map = self.liked_map();
        let changed = if liked {
            if liked_map.contains_key(&article.id) {
                false
            } else {
                liked_map.insert(article.id, LikedArticle::new(article));
                true
            }
        } else {
            liked_map.remove(&article.id).is_some()
        };

        if changed {
            self.write_json(LIKED_KEY, &liked_map)?;
        }
        Ok(())
    }

    /// Returns whether the article is liked afterwards.
    pub fn toggle_like(&self, article: &Article) -> Result<bool> {
        let mut liked = self.liked_map();
        let now_liked = if liked.remove(&article.id).is_some() {
            false
        } else {
            liked.insert(article.id, LikedArticle::new(article));
            true
        };
        self.write_json(LIKED_KEY, &liked)?;
        Ok(now_liked)
    }

    pub fn onboarding_completed(&self) -> bool {
        match self.read_raw(ONBOARDING_KEY).as_deref() {
            Some("true") => true,
            Some("false") | None => false,
            Some(other) => {
                tracing::warn!("Ignoring stored onboarding flag {:?}", other);
                false
            }
        }
    }

    pub fn set_onboarding_completed(&self, completed: bool) -> Result<()> {
        self.store
            .set(ONBOARDING_KEY, if completed { "true" } else { "false" })
    }

    pub fn complete_onboarding(&self) -> Result<()> {
        self.set_onboarding_completed(true)
    }

    /// Remove every preference this app stores.
    pub fn clear_all(&self) -> Result<()> {
        self.store.remove_many(&ALL_KEYS)
    }

    fn liked_map(&self) -> LikedMap {
        self.read_json(LIKED_KEY).unwrap_or_default()
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        self.store.get(key).unwrap_or_else(|e| {
            tracing::warn!("Failed to read {}: {}", key, e);
            None
        })
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring unreadable value for {}: {}", key, e);
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}
