pub mod context;
pub mod error;
pub mod state;

pub use context::AppContext;
pub use error::{BrainrError, FeedError, Result};
pub use state::{AppState, PrefEvent};
