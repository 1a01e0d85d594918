//! The article feed pipeline.
//!
//! [`FeedBuffer`] keeps a [`FeedWindow`] of image-bearing articles, a cursor
//! into it, and a preloaded batch that is refilled in the background.

pub mod buffer;
pub mod event;
pub mod filter;
pub mod window;

pub use buffer::{FeedBuffer, FeedState};
pub use event::FeedEvent;
pub use filter::{has_usable_image, MIN_THUMBNAIL_WIDTH};
pub use window::FeedWindow;
