use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use hl_core::{PageFetcher, Result, TopicFeed, DEFAULT_TOPIC_ID};

use crate::scrapers::BbcTopicScraper;
use crate::transport::{
    build_client, DirectFetcher, ProxiedFetcher, DEFAULT_PROXY_BASE, DEFAULT_TIMEOUT,
};

/// How pages are retrieved.
#[derive(Args, Debug, Clone)]
pub struct TransportArgs {
    /// Fetch through a passthrough proxy instead of hitting the site directly
    #[arg(long)]
    pub proxy: bool,

    /// Proxy base; the percent-encoded page URL is appended to it
    #[arg(long, default_value = DEFAULT_PROXY_BASE)]
    pub proxy_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "HL_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl TransportArgs {
    pub fn build_fetcher(&self) -> Result<Arc<dyn PageFetcher>> {
        let client = build_client(Duration::from_secs(self.timeout_secs))?;
        let fetcher: Arc<dyn PageFetcher> = if self.proxy {
            Arc::new(ProxiedFetcher::with_proxy_base(client, self.proxy_url.clone()))
        } else {
            Arc::new(DirectFetcher::new(client))
        };
        Ok(fetcher)
    }

    pub fn build_scraper(&self) -> Result<BbcTopicScraper> {
        Ok(BbcTopicScraper::new(self.build_fetcher()?))
    }
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Topic id as it appears in /news/topics/<id>
    #[arg(default_value = DEFAULT_TOPIC_ID)]
    pub topic: String,

    #[command(flatten)]
    pub transport: TransportArgs,

    /// Print rendered HTML cards instead of JSON
    #[arg(long)]
    pub html: bool,

    /// Section to render with --html ("all" for every section)
    #[arg(long, default_value = "all", requires = "html")]
    pub section: String,
}

pub async fn fetch_feed(args: &FetchArgs) -> Result<TopicFeed> {
    let scraper = args.transport.build_scraper()?;
    scraper.fetch_topic(&args.topic).await
}

pub fn feed_to_json(feed: &TopicFeed) -> Result<String> {
    Ok(serde_json::to_string_pretty(feed)?)
}
