use std::time::Duration;

use async_trait::async_trait;
use hl_core::{Error, PageFetcher, Result};
use url::form_urlencoded;

/// Passthrough proxy used when the page cannot be fetched cross-origin.
pub const DEFAULT_PROXY_BASE: &str = "https://corsproxy.io/?";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("hl/", env!("CARGO_PKG_VERSION"));

pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Fetches pages straight from the source site.
#[derive(Debug, Clone)]
pub struct DirectFetcher {
    client: reqwest::Client,
}

impl DirectFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for DirectFetcher {
    fn name(&self) -> &str {
        "direct"
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Fetches pages through a passthrough proxy that takes the target URL,
/// percent-encoded, appended to its base and answers with the raw body.
#[derive(Debug, Clone)]
pub struct ProxiedFetcher {
    client: reqwest::Client,
    proxy_base: String,
}

impl ProxiedFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_proxy_base(client, DEFAULT_PROXY_BASE)
    }

    pub fn with_proxy_base(client: reqwest::Client, proxy_base: impl Into<String>) -> Self {
        Self {
            client,
            proxy_base: proxy_base.into(),
        }
    }

    pub fn proxied_url(&self, target: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        format!("{}{}", self.proxy_base, encoded)
    }
}

#[async_trait]
impl PageFetcher for ProxiedFetcher {
    fn name(&self) -> &str {
        "proxy"
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let proxied = self.proxied_url(url);
        let response = self.client.get(&proxied).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Proxy {
                url: proxied,
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}
