use crate::app::{AppState, PrefEvent};
use crate::domain::Article;
use crate::feed::{FeedEvent, FeedState};
use crate::tui::event::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Card,
    Detail,
}

/// Where an action goes once the screen has interpreted it.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Feed(FeedEvent),
    Pref(PrefEvent),
    OpenBrowser(String),
    None,
}

pub struct TuiApp {
    pub view: View,
    pub detail_scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            view: View::Card,
            detail_scroll: 0,
            should_quit: false,
            status_message: None,
        }
    }

    /// Interpret `action` against the article on screen.
    ///
    /// Screen-local actions (quit, view changes, scrolling) are handled
    /// here; the rest come back as a [`Command`] for the caller to run.
    pub fn handle_action(
        &mut self,
        action: Action,
        current: Option<&Article>,
        feed_state: &FeedState,
    ) -> Command {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Command::None
            }
            Action::Next => match self.view {
                View::Card => Command::Feed(FeedEvent::Advance),
                View::Detail => {
                    self.detail_scroll = self.detail_scroll.saturating_add(1);
                    Command::None
                }
            },
            Action::Previous => match self.view {
                View::Card => Command::Feed(FeedEvent::Retreat),
                View::Detail => {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                    Command::None
                }
            },
            Action::OpenDetail => {
                if current.is_some() {
                    self.view = View::Detail;
                    self.detail_scroll = 0;
                }
                Command::None
            }
            Action::Back => {
                self.view = View::Card;
                Command::None
            }
            Action::OpenInBrowser => current
                .map(|article| Command::OpenBrowser(article.link()))
                .unwrap_or(Command::None),
            Action::ToggleBookmark => current
                .map(|article| Command::Pref(PrefEvent::ToggleBookmark(article.clone())))
                .unwrap_or(Command::None),
            Action::ToggleLike => current
                .map(|article| Command::Pref(PrefEvent::ToggleLike(article.clone())))
                .unwrap_or(Command::None),
            Action::ToggleTheme => Command::Pref(PrefEvent::ToggleTheme),
            Action::Retry => match feed_state {
                FeedState::Failed(_) | FeedState::Exhausted | FeedState::Empty => {
                    self.view = View::Card;
                    Command::Feed(FeedEvent::Reload)
                }
                _ => Command::None,
            },
            Action::None => Command::None,
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Status line confirming a preference change that has been applied.
pub fn describe_pref(event: &PrefEvent, state: &AppState) -> String {
    match event {
        PrefEvent::ToggleTheme => format!("Theme: {}", state.theme),
        PrefEvent::ToggleBookmark(article) if state.is_bookmarked(article.id) => {
            format!("Bookmarked: {}", article.display_title())
        }
        PrefEvent::ToggleBookmark(article) => {
            format!("Removed bookmark: {}", article.display_title())
        }
        PrefEvent::RemoveBookmark(id) => format!("Removed bookmark {}", id),
        PrefEvent::ToggleLike(article) if state.is_liked(article.id) => {
            format!("Liked: {}", article.display_title())
        }
        PrefEvent::ToggleLike(article) => format!("Unliked: {}", article.display_title()),
        PrefEvent::SetTopics(topics) if topics.is_empty() => "Following no topics".to_string(),
        PrefEvent::SetTopics(topics) => format!("Following: {}", topics.join(", ")),
        PrefEvent::CompleteOnboarding => "Setup complete".to_string(),
    }
}
