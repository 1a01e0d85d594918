use std::collections::HashSet;

use tracing::error;

use crate::app::{BrainrError, Result};
use crate::domain::{Article, Bookmark, Theme, TopicId};
use crate::store::PreferenceStore;

/// A change to the user's preferences.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefEvent {
    ToggleTheme,
    SetTopics(Vec<TopicId>),
    ToggleBookmark(Article),
    RemoveBookmark(u64),
    ToggleLike(Article),
    CompleteOnboarding,
}

/// Preferences loaded for one session.
///
/// Changes land in memory first and are then written through to the store.
pub struct AppState {
    prefs: PreferenceStore,
    pub theme: Theme,
    pub topics: Vec<TopicId>,
    pub bookmarks: Vec<Bookmark>,
    pub liked: HashSet<u64>,
    pub onboarding_completed: bool,
}

impl AppState {
    pub fn load(prefs: PreferenceStore) -> Self {
        let liked = prefs.liked_articles().iter().map(|l| l.id).collect();
        Self {
            theme: prefs.theme(),
            topics: prefs.topics(),
            bookmarks: prefs.bookmarks(),
            onboarding_completed: prefs.onboarding_completed(),
            liked,
            prefs,
        }
    }

    pub fn is_bookmarked(&self, id: u64) -> bool {
        self.bookmarks.iter().any(|b| b.id() == id)
    }

    pub fn is_liked(&self, id: u64) -> bool {
        self.liked.contains(&id)
    }

    /// Apply `event` and persist it. A failed write is logged and returned;
    /// the in-memory change is kept either way.
    pub fn apply(&mut self, event: PrefEvent) -> Result<()> {
        let result = match event {
            PrefEvent::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.prefs.set_theme(self.theme)
            }
            PrefEvent::SetTopics(topics) => {
                self.topics = topics;
                self.prefs.set_topics(&self.topics)
            }
            PrefEvent::ToggleBookmark(article) => {
                if self.is_bookmarked(article.id) {
                    self.bookmarks.retain(|b| b.id() != article.id);
                    self.unsave_bookmark(article.id)
                } else {
                    self.bookmarks.push(Bookmark::new(article.clone()));
                    self.prefs.add_bookmark(&article).map(|_| ())
                }
            }
            PrefEvent::RemoveBookmark(id) => {
                self.bookmarks.retain(|b| b.id() != id);
                self.unsave_bookmark(id)
            }
            PrefEvent::ToggleLike(article) => {
                let liked = !self.liked.remove(&article.id);
                if liked {
                    self.liked.insert(article.id);
                }
                self.prefs.set_liked(&article, liked)
            }
            PrefEvent::CompleteOnboarding => {
                self.onboarding_completed = true;
                self.prefs.complete_onboarding()
            }
        };

        if let Err(e) = &result {
            error!("Failed to save preferences: {}", e);
        }
        result
    }

    /// A bookmark the store never saved is already gone.
    fn unsave_bookmark(&self, id: u64) -> Result<()> {
        match self.prefs.remove_bookmark(id) {
            Err(BrainrError::BookmarkNotFound(_)) => Ok(()),
            other => other,
        }
    }
}
