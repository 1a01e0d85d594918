pub mod http_fetcher;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::Result;

/// Query parameters of a single API request, in request order.
pub type QueryParams = Vec<(&'static str, String)>;

/// Performs one GET against the encyclopedia API and returns the decoded
/// JSON body.
#[async_trait]
pub trait Fetcher {
    async fn get_json(&self, params: &QueryParams) -> Result<Value>;
}
