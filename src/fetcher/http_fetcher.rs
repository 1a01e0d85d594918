use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::app::Result;
use crate::config::ApiConfig;
use crate::fetcher::{Fetcher, QueryParams};

pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let base_url = Url::parse(&config.base_url)?;

        Ok(Self { client, base_url })
    }

    /// Build the full request URL. Every request asks for JSON.
    pub fn request_url(&self, params: &QueryParams) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("format", "json");
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        url
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_json(&self, params: &QueryParams) -> Result<Value> {
        let url = self.request_url(params);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_appends_format_and_params() {
        let fetcher = HttpFetcher::new(&ApiConfig::default()).unwrap();
        let url = fetcher.request_url(&vec![
            ("action", "query".to_string()),
            ("gcmtitle", "Category:Science".to_string()),
        ]);

        assert_eq!(url.host_str(), Some("en.wikipedia.org"));
        assert_eq!(url.path(), "/w/api.php");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("format".into(), "json".into()));
        assert_eq!(pairs[1], ("action".into(), "query".into()));
        assert_eq!(pairs[2], ("gcmtitle".into(), "Category:Science".into()));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = ApiConfig {
            base_url: "not a url".into(),
            ..ApiConfig::default()
        };
        assert!(HttpFetcher::new(&config).is_err());
    }
}
