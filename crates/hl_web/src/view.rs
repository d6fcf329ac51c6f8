use hl_core::{Article, SectionSummary, TopicFeed};

/// Which section the card grid shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SectionFilter {
    #[default]
    All,
    Named(String),
}

impl SectionFilter {
    /// Wire value of [`SectionFilter::All`] in query strings and `data-section` attributes.
    pub const ALL: &'static str = "all";

    pub fn as_str(&self) -> &str {
        match self {
            SectionFilter::All => Self::ALL,
            SectionFilter::Named(name) => name,
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        match self {
            SectionFilter::All => true,
            SectionFilter::Named(name) => article.section == *name,
        }
    }
}

impl From<&str> for SectionFilter {
    fn from(value: &str) -> Self {
        if value.is_empty() || value == Self::ALL {
            SectionFilter::All
        } else {
            SectionFilter::Named(value.to_string())
        }
    }
}

pub fn filter_articles<'a>(articles: &'a [Article], filter: &SectionFilter) -> Vec<&'a Article> {
    articles.iter().filter(|a| filter.matches(a)).collect()
}

/// Articles of the last fetch plus the selected section.
///
/// Built fresh from every [`TopicFeed`]; nothing carries over between fetches.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    topic_title: Option<String>,
    fetched_at: String,
    articles: Vec<Article>,
    sections: Vec<SectionSummary>,
    selected: SectionFilter,
}

impl ViewState {
    pub fn new(feed: TopicFeed) -> Self {
        Self {
            topic_title: feed.topic.title,
            fetched_at: feed.fetched_at,
            articles: feed.articles,
            sections: feed.sections,
            selected: SectionFilter::All,
        }
    }

    pub fn topic_title(&self) -> Option<&str> {
        self.topic_title.as_deref()
    }

    /// ISO-8601 instant of the fetch this view was built from.
    pub fn fetched_at(&self) -> &str {
        &self.fetched_at
    }

    pub fn select(&mut self, filter: SectionFilter) {
        self.selected = filter;
    }

    pub fn selected(&self) -> &SectionFilter {
        &self.selected
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn sections(&self) -> &[SectionSummary] {
        &self.sections
    }

    pub fn visible(&self) -> Vec<&Article> {
        filter_articles(&self.articles, &self.selected)
    }
}
