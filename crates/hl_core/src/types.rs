use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Section title used when the source section carries none.
pub const UNTITLED_SECTION: &str = "Untitled Section";

/// Link used for articles without a destination.
pub const LINK_PLACEHOLDER: &str = "#";

/// A single headline as listed on a topic page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub section: String,
    pub title: String,
    pub description: Option<String>,
    pub href: String,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub content_type: Option<String>,
    pub last_updated: Option<String>,
    pub topics: Vec<String>,
    pub is_live: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub title: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicInfo {
    pub id: Option<String>,
    pub title: Option<String>,
    pub seo: Option<serde_json::Value>,
}

/// Everything extracted from one topic page, before it is stamped with a fetch time.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicPage {
    pub topic: TopicInfo,
    pub articles: Vec<Article>,
    pub sections: Vec<SectionSummary>,
}

/// Result of fetching a topic, as served by the API and printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicFeed {
    pub topic: TopicInfo,
    pub articles: Vec<Article>,
    pub total_articles: usize,
    pub sections: Vec<SectionSummary>,
    pub fetched_at: String,
}

impl TopicFeed {
    pub fn new(page: TopicPage, fetched_at: DateTime<Utc>) -> Self {
        Self {
            total_articles: page.articles.len(),
            topic: page.topic,
            articles: page.articles,
            sections: page.sections,
            fetched_at: to_iso_millis(&fetched_at),
        }
    }
}

/// Formats an instant as `2024-05-01T12:00:00.000Z`.
pub fn to_iso_millis(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(section: &str) -> Article {
        Article {
            section: section.to_string(),
            title: "Title".to_string(),
            description: None,
            href: LINK_PLACEHOLDER.to_string(),
            image: None,
            image_alt: None,
            content_type: None,
            last_updated: None,
            topics: vec![],
            is_live: false,
        }
    }

    #[test]
    fn test_to_iso_millis() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(to_iso_millis(&instant), "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn test_feed_counts_and_camel_case() {
        let page = TopicPage {
            topic: TopicInfo { id: Some("c2vdnvdg6xxt".into()), title: None, seo: None },
            articles: vec![article("World"), article("Live")],
            sections: vec![
                SectionSummary { title: "World".into(), count: 1 },
                SectionSummary { title: "Live".into(), count: 1 },
            ],
        };
        let feed = TopicFeed::new(page, Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        assert_eq!(feed.total_articles, 2);

        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json["totalArticles"], 2);
        assert_eq!(json["fetchedAt"], "2024-01-02T03:04:05.000Z");
        assert_eq!(json["articles"][0]["isLive"], false);
        assert!(json["articles"][0]["imageAlt"].is_null());
    }
}
