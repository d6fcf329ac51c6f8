use async_trait::async_trait;
use crate::Result;

/// Transport that turns a page URL into its HTML text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Retrieves the page body, failing on transport errors and non-success statuses
    async fn fetch_html(&self, url: &str) -> Result<String>;
}
