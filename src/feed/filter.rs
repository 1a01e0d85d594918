use crate::domain::Article;

/// Thumbnails must be strictly wider than this to be shown on a card.
pub const MIN_THUMBNAIL_WIDTH: u32 = 100;

pub fn has_usable_image(article: &Article) -> bool {
    article
        .thumbnail
        .as_ref()
        .is_some_and(|thumb| !thumb.url.is_empty() && thumb.width > MIN_THUMBNAIL_WIDTH)
}
