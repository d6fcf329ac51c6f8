pub mod cli;
pub mod logging;
pub mod scrapers;
pub mod transport;

pub use cli::{fetch_feed, feed_to_json, FetchArgs, TransportArgs};
pub use logging::init_logging;
pub use scrapers::{extract_topic_page, BbcTopicScraper};
pub use transport::{build_client, DirectFetcher, ProxiedFetcher, DEFAULT_PROXY_BASE};

pub mod prelude {
    pub use super::scrapers::BbcTopicScraper;
    pub use hl_core::{Article, Error, PageFetcher, Result, TopicFeed};
}
