//! Sequential HTTP fetching of catalog articles.
//!
//! One GET per descriptor, preceded by a fixed courtesy pause. Anything other
//! than HTTP 200 is reported as a failed [`FetchResult`]; errors never escape
//! [`ContentFetcher::fetch`], so a run always covers the whole catalog.

use crate::config::ScraperConfig;
use crate::error::Result;
use crate::models::{ArticleDescriptor, FetchResult};
use crate::utils::truncate_chars;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct ContentFetcher {
    client: Client,
    pause: Duration,
}

impl ContentFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            pause: config.pause,
        })
    }

    /// Fetch one article body after the configured pause.
    ///
    /// Prints `Fetching: <title>...` and, on failure, the reason to stdout.
    ///
    /// # Arguments
    ///
    /// * `descriptor` - The catalog entry whose `url` is requested.
    ///
    /// # Returns
    ///
    /// A successful [`FetchResult`] only for an HTTP 200 with a non-empty body.
    /// Any other status, a transport error, an unparseable URL or an empty
    /// body produce [`FetchResult::failed`]. This function never errors.
    #[instrument(level = "info", skip_all, fields(id = %descriptor.id, url = %descriptor.url))]
    pub async fn fetch(&self, descriptor: &ArticleDescriptor) -> FetchResult {
        println!("Fetching: {}...", truncate_chars(&descriptor.title, 50));

        sleep(self.pause).await;

        match self.get_body(&descriptor.url).await {
            Ok(body) => {
                info!(bytes = body.len(), "Fetched article");
                FetchResult::success(descriptor.clone(), body)
            }
            Err(reason) => {
                println!("  {reason}");
                FetchResult::failed(descriptor.clone())
            }
        }
    }

    async fn get_body(&self, url: &str) -> std::result::Result<String, String> {
        let parsed = Url::parse(url).map_err(|e| format!("Error: {e}"))?;
        debug!(host = parsed.host_str().unwrap_or_default(), "Requesting");

        let response = self.client.get(parsed).send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            format!("Error: {e}")
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Non-success status");
            return Err(format!("Failed with status {}", status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed reading body");
            format!("Error: {e}")
        })?;
        if body.is_empty() {
            warn!("Empty response body");
            return Err("Error: empty response body".to_string());
        }
        Ok(body)
    }
}
