use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use hl_core::{TopicFeed, DEFAULT_TOPIC_ID};
use serde::Deserialize;
use serde_json::json;

use crate::render::render_view;
use crate::view::{SectionFilter, ViewState};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CardsQuery {
    pub topic: Option<String>,
    pub section: Option<String>,
}

/// Any fetch failure, reported to the caller as one generic error.
#[derive(Debug)]
pub struct ApiError(hl_core::Error);

impl From<hl_core::Error> for ApiError {
    fn from(e: hl_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Error fetching news");
        let body = json!({
            "error": "Failed to fetch news",
            "message": self.0.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

fn topic_or_default(topic: Option<&str>) -> &str {
    topic.filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TOPIC_ID)
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<TopicFeed>, ApiError> {
    let topic = topic_or_default(query.topic.as_deref());
    let feed = state.scraper.fetch_topic(topic).await?;
    Ok(Json(feed))
}

pub async fn get_news_cards(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CardsQuery>,
) -> Result<Html<String>, ApiError> {
    let topic = topic_or_default(query.topic.as_deref());
    let feed = state.scraper.fetch_topic(topic).await?;

    let mut view = ViewState::new(feed);
    view.select(SectionFilter::from(
        query.section.as_deref().unwrap_or(SectionFilter::ALL),
    ));
    Ok(Html(render_view(&view, Utc::now())))
}
