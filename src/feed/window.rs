use crate::domain::Article;

/// The articles a feed session knows about and the read position.
///
/// `items` only ever grows. `cursor` stays within `items` and only moves
/// past the last item by merging `pending` first.
#[derive(Debug, Clone, Default)]
pub struct FeedWindow {
    items: Vec<Article>,
    cursor: usize,
    pending: Vec<Article>,
}

impl FeedWindow {
    pub fn new(items: Vec<Article>) -> Self {
        Self {
            items,
            cursor: 0,
            pending: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(items: Vec<Article>, cursor: usize, pending: Vec<Article>) -> Self {
        assert!(cursor < items.len().max(1));
        Self {
            items,
            cursor,
            pending,
        }
    }

    pub fn items(&self) -> &[Article] {
        &self.items
    }

    pub fn pending(&self) -> &[Article] {
        &self.pending
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> Option<&Article> {
        self.items.get(self.cursor)
    }

    /// Items left after the current one.
    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.cursor + 1)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.items.iter().chain(self.pending.iter()).any(|a| a.id == id)
    }

    pub fn step_forward(&mut self) -> bool {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn step_back(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Append preloaded articles, skipping any already known.
    pub fn extend_pending(&mut self, articles: Vec<Article>) -> usize {
        let before = self.pending.len();
        for article in articles {
            if !self.contains(article.id) {
                self.pending.push(article);
            }
        }
        self.pending.len() - before
    }

    /// Move `pending` onto the end of `items` and step onto the first merged
    /// article. Returns false when nothing was pending.
    pub fn merge_pending(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        self.items.append(&mut self.pending);
        self.step_forward()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::image_articles;

    #[test]
    fn test_step_forward_stops_at_last_item() {
        let mut window = FeedWindow::new(image_articles(0..3));
        assert!(window.step_forward());
        assert!(window.step_forward());
        assert!(!window.step_forward());
        assert_eq!(window.cursor(), 2);
        assert_eq!(window.remaining(), 0);
    }

    #[test]
    fn test_step_back_clamps_at_zero() {
        let mut window = FeedWindow::new(image_articles(0..3));
        assert!(!window.step_back());
        assert_eq!(window.cursor(), 0);
    }

    #[test]
    fn test_merge_pending_moves_onto_first_merged() {
        let mut window = FeedWindow::from_parts(image_articles(0..2), 1, image_articles(2..4));
        assert!(window.merge_pending());
        assert_eq!(window.len(), 4);
        assert_eq!(window.cursor(), 2);
        assert!(window.pending().is_empty());
        assert_eq!(window.current().unwrap().id, 2);
    }

    #[test]
    fn test_merge_without_pending_is_noop() {
        let mut window = FeedWindow::new(image_articles(0..2));
        assert!(!window.merge_pending());
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn test_extend_pending_skips_known_ids() {
        let mut window = FeedWindow::new(image_articles(0..3));
        let added = window.extend_pending(image_articles(2..5));
        assert_eq!(added, 2);
        let ids: Vec<u64> = window.pending().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }
}
