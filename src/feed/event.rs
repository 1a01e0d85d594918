/// Navigation requests sent to a [`FeedBuffer`](super::FeedBuffer) by the
/// presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEvent {
    /// Show the next article, merging preloaded ones at the end.
    Advance,
    /// Show the previous article. No-op on the first one.
    Retreat,
    /// Start a fresh session with the same topics.
    Reload,
}
