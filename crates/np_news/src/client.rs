use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use np_core::{Error, NewsProvider, RawArticle, Result};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

#[derive(Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Deserialize)]
struct SourcesResponse {
    #[serde(default)]
    sources: Vec<serde_json::Value>,
}

/// Thin client for the NewsAPI `everything` and `sources` endpoints.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("newspulse/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn everything(&self, params: &[(&str, &str)]) -> Result<Vec<RawArticle>> {
        let response = self
            .client
            .get(format!("{}/everything", self.base_url))
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::News(format!(
                "news API request failed: {}",
                status
            )));
        }

        let body = response.json::<EverythingResponse>().await?;
        Ok(body.articles)
    }
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn from_sources(&self, sources: &[&str], page_size: u32) -> Result<Vec<RawArticle>> {
        let sources = sources.join(",");
        let page_size = page_size.to_string();
        self.everything(&[
            ("sources", sources.as_str()),
            ("language", "en"),
            ("sortBy", "publishedAt"),
            ("pageSize", page_size.as_str()),
            ("page", "1"),
        ])
        .await
    }

    async fn search(&self, query: &str, page_size: u32) -> Result<Vec<RawArticle>> {
        let page_size = page_size.to_string();
        self.everything(&[
            ("q", query),
            ("language", "en"),
            ("sortBy", "publishedAt"),
            ("pageSize", page_size.as_str()),
            ("page", "1"),
        ])
        .await
    }

    async fn ping(&self) -> Result<usize> {
        let response = self
            .client
            .get(format!("{}/sources", self.base_url))
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("category", "technology"),
                ("language", "en"),
                ("country", "us"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::News(format!(
                "news API sources request failed: {}",
                status
            )));
        }

        let body = response.json::<SourcesResponse>().await?;
        Ok(body.sources.len())
    }
}
