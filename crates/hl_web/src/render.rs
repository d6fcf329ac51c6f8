//! HTML rendering of headline cards and the section filter bar.
//!
//! Every function here is pure: output depends only on its arguments,
//! including the `now` used for relative timestamps.

use chrono::{DateTime, Datelike, Utc};
use hl_core::{Article, UNTITLED_SECTION};

use crate::view::{SectionFilter, ViewState};

const DEFAULT_CONTENT_TYPE: &str = "article";
const MAX_TOPIC_TAGS: usize = 2;
const EAGER_IMAGES: usize = 3;

const ICON_NEWSPAPER: &str = r#"<svg width="32" height="32" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5"><path d="M4 22h16a2 2 0 0 0 2-2V4a2 2 0 0 0-2-2H8a2 2 0 0 0-2 2v16a2 2 0 0 1-2 2zm0 0a2 2 0 0 1-2-2v-9c0-1.1.9-2 2-2h2"/><path d="M18 14h-8M15 18h-5M10 6h8v4h-8z"/></svg>"#;
const ICON_CALENDAR: &str = r#"<svg width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><rect x="3" y="4" width="18" height="18" rx="2"/><path d="M16 2v4M8 2v4M3 10h18"/></svg>"#;
const ICON_ARROW: &str = r#"<svg width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M5 12h14M12 5l7 7-7 7"/></svg>"#;
const ICON_EMPTY: &str = r#"<svg width="48" height="48" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5"><path d="M13 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V9z"/><polyline points="13 2 13 9 20 9"/></svg>"#;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"5m ago"`, `"3h ago"`, `"2d ago"`, then `"May 1"` (with the year when it differs from `now`).
pub fn format_relative(timestamp: &str, now: DateTime<Utc>) -> String {
    let date = match DateTime::parse_from_rfc3339(timestamp) {
        Ok(date) => date.with_timezone(&Utc),
        Err(_) => return timestamp.to_string(),
    };

    let diff = (now - date).max(chrono::Duration::zero());
    if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_hours() < 24 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 7 {
        format!("{}d ago", diff.num_days())
    } else if date.year() != now.year() {
        date.format("%b %-d, %Y").to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

/// Wall-clock `HH:MM` of an ISO-8601 instant, in UTC.
pub fn format_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(date) => date.with_timezone(&Utc).format("%H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

pub fn render_card(article: &Article, index: usize, now: DateTime<Utc>) -> String {
    let href = escape_html(&article.href);
    let title = escape_html(&article.title);

    let image = match &article.image {
        Some(src) => format!(
            r#"<div class="card-image-wrapper"><img class="card-image" src="{}" alt="{}" loading="{}"></div>"#,
            escape_html(src),
            escape_html(article.image_alt.as_deref().unwrap_or(&article.title)),
            if index < EAGER_IMAGES { "eager" } else { "lazy" },
        ),
        None => format!(r#"<div class="card-image placeholder">{}</div>"#, ICON_NEWSPAPER),
    };

    let live = if article.is_live {
        r#"<span class="live-badge">LIVE</span>"#
    } else {
        ""
    };

    let content_type = capitalize(article.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE));

    let section = if article.section.is_empty() || article.section == UNTITLED_SECTION {
        String::new()
    } else {
        format!(r#"<span class="card-section">{}</span>"#, escape_html(&article.section))
    };

    let description = article
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="card-description">{}</p>"#, escape_html(d)))
        .unwrap_or_default();

    let date = article
        .last_updated
        .as_deref()
        .map(|ts| {
            format!(
                r#"<span class="card-date">{}{}</span>"#,
                ICON_CALENDAR,
                escape_html(&format_relative(ts, now))
            )
        })
        .unwrap_or_default();

    let topics = article
        .topics
        .iter()
        .take(MAX_TOPIC_TAGS)
        .map(|t| format!(r#"<span class="topic-tag">{}</span>"#, escape_html(t)))
        .collect::<String>();

    format!(
        concat!(
            r#"<article class="headline-card">{image}<div class="card-content">"#,
            r#"<div class="card-meta">{live}<span class="card-type">{content_type}</span>{section}</div>"#,
            r#"<h2 class="card-title"><a href="{href}" target="_blank" rel="noopener noreferrer">{title}</a></h2>"#,
            r#"{description}"#,
            r#"<div class="card-footer"><div>{date}<div class="card-topics">{topics}</div></div>"#,
            r#"<a href="{href}" target="_blank" rel="noopener noreferrer" class="read-more">Read more{arrow}</a>"#,
            r#"</div></div></article>"#,
        ),
        image = image,
        live = live,
        content_type = escape_html(&content_type),
        section = section,
        href = href,
        title = title,
        description = description,
        date = date,
        topics = topics,
        arrow = ICON_ARROW,
    )
}

pub fn render_empty() -> String {
    format!(
        r#"<div class="error empty-state"><div class="error-icon">{}</div><p>No articles found in this section.</p></div>"#,
        ICON_EMPTY
    )
}

pub fn render_articles(articles: &[&Article], now: DateTime<Utc>) -> String {
    if articles.is_empty() {
        return render_empty();
    }
    articles
        .iter()
        .enumerate()
        .map(|(i, article)| render_card(article, i, now))
        .collect()
}

/// "All (N)" followed by one button per non-empty section.
pub fn render_filters(view: &ViewState) -> String {
    let button = |filter: &SectionFilter, label: &str, count: usize| {
        let active = if view.selected() == filter { " active" } else { "" };
        format!(
            r#"<button class="filter-btn{}" data-section="{}">{} ({})</button>"#,
            active,
            escape_html(filter.as_str()),
            escape_html(label),
            count
        )
    };

    let mut out = button(&SectionFilter::All, "All", view.articles().len());
    for section in view.sections() {
        if section.title.is_empty() || section.count == 0 {
            continue;
        }
        let filter = SectionFilter::Named(section.title.clone());
        out.push_str(&button(&filter, &section.title, section.count));
    }
    out
}

/// Topic title, article count and the time of the fetch.
pub fn render_stats(view: &ViewState) -> String {
    let title = view
        .topic_title()
        .map(|t| format!(r#"<h1 class="topic-title">{}</h1>"#, escape_html(t)))
        .unwrap_or_default();
    format!(
        concat!(
            r#"<header class="stats">{}"#,
            r#"<span class="stat"><span id="article-count">{}</span> articles</span>"#,
            r#"<span class="stat">Updated <span id="last-updated">{}</span></span>"#,
            r#"</header>"#,
        ),
        title,
        view.articles().len(),
        escape_html(&format_time(view.fetched_at()))
    )
}

/// Stats header, filter bar and card grid for the current selection.
pub fn render_view(view: &ViewState, now: DateTime<Utc>) -> String {
    format!(
        r#"{}<nav class="section-filters">{}</nav><div class="headlines-grid">{}</div>"#,
        render_stats(view),
        render_filters(view),
        render_articles(&view.visible(), now)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hl_core::{SectionSummary, TopicFeed, TopicInfo, LINK_PLACEHOLDER};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn article() -> Article {
        Article {
            section: "World".to_string(),
            title: "Talks <resume> & \"stall\"".to_string(),
            description: Some("Negotiators return.".to_string()),
            href: "https://www.bbc.com/news/articles/c1".to_string(),
            image: Some("https://ichef.bbci.co.uk/ace/standard/1024/x.jpg".to_string()),
            image_alt: None,
            content_type: Some("video".to_string()),
            last_updated: Some("2024-05-10T09:00:00.000Z".to_string()),
            topics: vec!["Gaza".into(), "Israel".into(), "Egypt".into()],
            is_live: true,
        }
    }

    fn feed(articles: Vec<Article>, sections: Vec<SectionSummary>) -> TopicFeed {
        TopicFeed {
            topic: TopicInfo { id: None, title: Some("Gaza & Israel".into()), seo: None },
            total_articles: articles.len(),
            articles,
            sections,
            fetched_at: "2024-05-10T12:00:00.000Z".into(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert('x') & "y"</script>"#),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("article"), "Article");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_format_relative() {
        assert_eq!(format_relative("2024-05-10T11:35:00Z", now()), "25m ago");
        assert_eq!(format_relative("2024-05-10T09:00:00.000Z", now()), "3h ago");
        assert_eq!(format_relative("2024-05-08T12:00:00Z", now()), "2d ago");
        assert_eq!(format_relative("2024-04-01T12:00:00Z", now()), "Apr 1");
        assert_eq!(format_relative("2023-12-25T12:00:00Z", now()), "Dec 25, 2023");
        assert_eq!(format_relative("2024-05-11T12:00:00Z", now()), "0m ago");
        assert_eq!(format_relative("not a date", now()), "not a date");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("2024-05-10T09:05:00.000Z"), "09:05");
        assert_eq!(format_time("2024-05-10T23:30:00+02:00"), "21:30");
        assert_eq!(format_time("soon"), "soon");
    }

    #[test]
    fn test_card_contents() {
        let html = render_card(&article(), 0, now());
        assert!(html.contains(r#"<span class="live-badge">LIVE</span>"#));
        assert!(html.contains(r#"<span class="card-type">Video</span>"#));
        assert!(html.contains(r#"<span class="card-section">World</span>"#));
        assert!(html.contains("Talks &lt;resume&gt; &amp; &quot;stall&quot;"));
        assert!(!html.contains("<resume>"));
        assert!(html.contains(r#"target="_blank" rel="noopener noreferrer""#));
        assert!(html.contains(r#"<p class="card-description">Negotiators return.</p>"#));
        assert!(html.contains("3h ago"));
        assert!(html.contains(r#"loading="eager""#));
        assert!(html.contains("Gaza") && html.contains("Israel"));
        assert!(!html.contains("Egypt"));
        assert!(html.contains("Read more"));
    }

    #[test]
    fn test_card_defaults_and_omissions() {
        let mut bare = article();
        bare.section = UNTITLED_SECTION.to_string();
        bare.description = None;
        bare.image = None;
        bare.content_type = None;
        bare.last_updated = None;
        bare.topics.clear();
        bare.is_live = false;
        bare.href = LINK_PLACEHOLDER.to_string();

        let html = render_card(&bare, 5, now());
        assert!(html.contains(r#"<span class="card-type">Article</span>"#));
        assert!(html.contains("card-image placeholder"));
        assert!(!html.contains("card-section"));
        assert!(!html.contains("card-description"));
        assert!(!html.contains("card-date"));
        assert!(!html.contains("live-badge"));
        assert!(html.contains(r##"href="#""##));
    }

    #[test]
    fn test_lazy_loading_after_first_three() {
        let html = render_card(&article(), 3, now());
        assert!(html.contains(r#"loading="lazy""#));
    }

    #[test]
    fn test_empty_state() {
        let html = render_articles(&[], now());
        assert!(html.contains("No articles found in this section."));
        assert!(!html.contains("headline-card"));
    }

    #[test]
    fn test_filters_and_view() {
        let mut live = article();
        live.section = "Live".to_string();
        live.title = "Live page".to_string();
        let mut view = ViewState::new(feed(
            vec![article(), live],
            vec![
                SectionSummary { title: "World".into(), count: 1 },
                SectionSummary { title: "Live".into(), count: 1 },
                SectionSummary { title: "Empty".into(), count: 0 },
            ],
        ));

        let filters = render_filters(&view);
        assert!(filters.contains(r#"<button class="filter-btn active" data-section="all">All (2)</button>"#));
        assert!(filters.contains(r#"data-section="Live">Live (1)</button>"#));
        assert!(!filters.contains("Empty"));

        view.select(SectionFilter::from("Live"));
        let html = render_view(&view, now());
        assert!(html.contains(r#"<h1 class="topic-title">Gaza &amp; Israel</h1>"#));
        assert!(html.contains(r#"<span id="article-count">2</span> articles"#));
        assert!(html.contains(r#"Updated <span id="last-updated">12:00</span>"#));
        assert!(html.contains(r#"<button class="filter-btn active" data-section="Live">"#));
        assert!(html.contains("Live page"));
        assert!(!html.contains("Talks"));

        view.select(SectionFilter::from("Sport"));
        assert!(render_view(&view, now()).contains("No articles found in this section."));
    }
}
