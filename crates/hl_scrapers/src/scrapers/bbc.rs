use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use hl_core::{
    to_iso_millis, Article, Error, PageFetcher, Result, SectionSummary, TopicFeed, TopicInfo,
    TopicPage, LINK_PLACEHOLDER, SOURCE_ORIGIN, UNTITLED_SECTION,
};
use serde_json::Value;
use url::Url;

use super::next_data::{extract_next_data, page_object};
use crate::logging::Logger;

const LOW_RES_SEGMENT: &str = "/480/";
const HIGH_RES_SEGMENT: &str = "/1024/";

/// Fetches BBC topic pages and turns them into a [`TopicFeed`].
///
/// The transport is pluggable: [`crate::DirectFetcher`] on the server side,
/// [`crate::ProxiedFetcher`] where the page has to go through a passthrough proxy.
#[derive(Clone)]
pub struct BbcTopicScraper {
    fetcher: Arc<dyn PageFetcher>,
    origin: String,
}

impl BbcTopicScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            origin: SOURCE_ORIGIN.to_string(),
        }
    }

    /// Points the scraper at another origin, mostly useful against a local fixture server.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into().trim_end_matches('/').to_string();
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn topic_url(&self, topic_id: &str) -> Result<String> {
        let valid = !topic_id.is_empty()
            && topic_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(Error::InvalidTopic(topic_id.to_string()));
        }

        let base = Url::parse(&self.origin)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.origin, e)))?;
        let url = base
            .join(&format!("news/topics/{}", topic_id))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.origin, e)))?;
        Ok(url.to_string())
    }

    pub async fn fetch_topic(&self, topic_id: &str) -> Result<TopicFeed> {
        let logger = Logger::new()
            .with_prefix(format!("[{}]", self.fetcher.name()))
            .with_prefix(format!("[{}]", topic_id));

        let url = self.topic_url(topic_id)?;
        logger.info(&format!("Fetching {}", url));

        let html = match self.fetcher.fetch_html(&url).await {
            Ok(html) => html,
            Err(e) => {
                if e.is_transport() {
                    logger.warn(&format!("Transport failure: {}", e));
                } else {
                    logger.error(&format!("Fetch failed: {}", e));
                }
                return Err(e);
            }
        };
        logger.debug(&format!("Received {} bytes", html.len()));

        let page = extract_topic_page(&html, &self.origin).map_err(|e| {
            logger.error(&format!("Extraction failed: {}", e));
            e
        })?;
        logger.info(&format!(
            "Extracted {} articles in {} sections",
            page.articles.len(),
            page.sections.len()
        ));

        Ok(TopicFeed::new(page, Utc::now()))
    }
}

/// Maps a topic page's HTML into topic metadata, articles and a section table.
///
/// Relative links are resolved against `origin`.
pub fn extract_topic_page(html: &str, origin: &str) -> Result<TopicPage> {
    let payload = extract_next_data(html)?;
    let page = page_object(&payload)?;

    let topic = TopicInfo {
        id: page.get("id").and_then(Value::as_str).map(str::to_string),
        title: page.get("title").and_then(Value::as_str).map(str::to_string),
        seo: page.get("seo").filter(|v| !v.is_null()).cloned(),
    };

    let sections = match page.get("sections") {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(sections)) => sections.as_slice(),
        Some(_) => {
            return Err(Error::PageDataNotFound("sections is not an array".to_string()));
        }
    };

    let mut articles = Vec::new();
    let mut summaries: Vec<SectionSummary> = Vec::new();

    for section in sections {
        let section_title = non_empty_str(section.get("title"))
            .unwrap_or(UNTITLED_SECTION)
            .to_string();

        let content = section
            .get("content")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for item in content {
            articles.push(article_from_item(item, &section_title, origin));
        }

        match summaries.iter_mut().find(|s| s.title == section_title) {
            Some(summary) => summary.count += content.len(),
            None => summaries.push(SectionSummary {
                title: section_title,
                count: content.len(),
            }),
        }
    }

    Ok(TopicPage {
        topic,
        articles,
        sections: summaries,
    })
}

fn article_from_item(item: &Value, section: &str, origin: &str) -> Article {
    let blocks = item
        .get("image")
        .and_then(|i| i.get("model"))
        .and_then(|m| m.get("blocks"));
    let metadata = item.get("metadata");

    Article {
        section: section.to_string(),
        title: non_empty_str(item.get("title")).unwrap_or_default().to_string(),
        description: non_empty_str(item.get("description")).map(str::to_string),
        href: resolve_href(non_empty_str(item.get("href")), origin),
        image: non_empty_str(blocks.and_then(|b| b.get("src"))).map(upgrade_image),
        image_alt: non_empty_str(blocks.and_then(|b| b.get("altText"))).map(str::to_string),
        content_type: non_empty_str(metadata.and_then(|m| m.get("contentType")))
            .map(str::to_string),
        last_updated: metadata
            .and_then(|m| m.get("lastUpdated"))
            .and_then(normalize_timestamp),
        topics: metadata
            .and_then(|m| m.get("topics"))
            .and_then(Value::as_array)
            .map(|topics| {
                topics
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        is_live: item.get("isLiveNow").and_then(Value::as_bool).unwrap_or(false),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Absolute links pass through, paths are prefixed with `origin`, missing links become `#`.
pub fn resolve_href(href: Option<&str>, origin: &str) -> String {
    match href {
        None => LINK_PLACEHOLDER.to_string(),
        Some(href) if href.starts_with("https://") || href.starts_with("http://") => {
            href.to_string()
        }
        Some(href) if href.starts_with('/') => format!("{}{}", origin, href),
        Some(href) => format!("{}/{}", origin, href),
    }
}

/// Swaps the 480px rendition in an ichef URL for the 1024px one.
pub fn upgrade_image(src: &str) -> String {
    src.replacen(LOW_RES_SEGMENT, HIGH_RES_SEGMENT, 1)
}

/// Accepts epoch milliseconds (number or numeric string), RFC 3339, RFC 2822,
/// and ISO datetimes or dates without an offset, which are taken as UTC.
pub fn normalize_timestamp(value: &Value) -> Option<String> {
    let instant = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }?;
    Some(to_iso_millis(&instant))
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(millis) = s.parse::<i64>() {
        return DateTime::<Utc>::from_timestamp_millis(millis);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s).or_else(|_| DateTime::parse_from_rfc2822(s)) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
