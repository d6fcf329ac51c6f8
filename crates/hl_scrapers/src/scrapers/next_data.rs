use hl_core::{Error, Result};
use scraper::{Html, Selector};
use serde_json::Value;

const NEXT_DATA_SELECTOR: &str = "script#__NEXT_DATA__[type='application/json']";

/// Extracts the hydration payload that Next.js pages inline as
/// `<script id="__NEXT_DATA__" type="application/json">`.
///
/// Only the first matching element is considered. Its own text node is the
/// payload, so a second script later in the document cannot bleed into it.
pub fn extract_next_data(html: &str) -> Result<Value> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(NEXT_DATA_SELECTOR)
        .map_err(|e| Error::PageDataNotFound(format!("invalid selector: {}", e)))?;

    let script = document
        .select(&selector)
        .next()
        .ok_or(Error::PayloadNotFound)?;

    let text = script.text().collect::<String>();
    let json = serde_json::from_str::<Value>(text.trim())?;
    Ok(json)
}

/// Walks `props.pageProps.page.<first key>` and returns the page object.
pub fn page_object(payload: &Value) -> Result<&serde_json::Map<String, Value>> {
    let page = payload
        .get("props")
        .and_then(|p| p.get("pageProps"))
        .and_then(|p| p.get("page"))
        .and_then(Value::as_object)
        .ok_or_else(|| Error::PageDataNotFound("props.pageProps.page is missing".to_string()))?;

    let (key, data) = page
        .iter()
        .next()
        .ok_or_else(|| Error::PageDataNotFound("props.pageProps.page is empty".to_string()))?;

    data.as_object()
        .ok_or_else(|| Error::PageDataNotFound(format!("page entry {:?} is not an object", key)))
}
