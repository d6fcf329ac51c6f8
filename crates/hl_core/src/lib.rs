pub mod error;
pub mod fetch;
pub mod types;

pub use error::{Error, Result};
pub use fetch::PageFetcher;
pub use types::{
    to_iso_millis, Article, SectionSummary, TopicFeed, TopicInfo, TopicPage, LINK_PLACEHOLDER,
    UNTITLED_SECTION,
};

/// Topic fetched when none is given (Israel-Gaza war).
pub const DEFAULT_TOPIC_ID: &str = "c2vdnvdg6xxt";

/// Origin of the source site; relative article links are resolved against it.
pub const SOURCE_ORIGIN: &str = "https://www.bbc.com";
