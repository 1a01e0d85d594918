pub mod article;
pub mod bookmark;
pub mod theme;
pub mod topic;

pub use article::{Article, Thumbnail};
pub use bookmark::{Bookmark, LikedArticle};
pub use theme::Theme;
pub use topic::{Topic, TopicId};
