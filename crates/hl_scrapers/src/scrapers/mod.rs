pub mod bbc;
pub mod next_data;

pub use bbc::{extract_topic_page, BbcTopicScraper};
pub use next_data::extract_next_data;
