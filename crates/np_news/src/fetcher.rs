use std::collections::HashSet;

use tracing::{info, warn};

use np_core::{Error, NewsProvider, RawArticle, Result};

use crate::filter::filter_articles;

/// Trusted publisher source ids queried directly.
pub const TARGET_SOURCES: [&str; 5] = [
    "techcrunch",
    "wired",
    "the-verge",
    "ars-technica",
    "venturebeat",
];

/// Topic keywords queried one by one.
pub const TARGET_KEYWORDS: [&str; 5] = [
    "AI",
    "Technology",
    "Startups",
    "Funding",
    "Machine Learning",
];

const SOURCES_PAGE_SIZE: u32 = 20;
const KEYWORD_PAGE_SIZE: u32 = 5;
const MAX_CANDIDATES: usize = 15;

/// Pull candidate articles from the trusted sources and the topic
/// keywords, dedupe by URL, filter, and keep the most recent ones.
///
/// A failed keyword query is logged and skipped; a failed source query
/// fails the whole fetch.
pub async fn fetch_top_articles(provider: &dyn NewsProvider) -> Result<Vec<RawArticle>> {
    let (source_articles, keyword_articles) = tokio::join!(
        fetch_from_sources(provider),
        fetch_by_keywords(provider),
    );
    let source_articles = source_articles?;

    let mut combined = source_articles;
    combined.extend(keyword_articles);

    let unique = dedupe_by_url(combined);
    info!("found {} unique articles", unique.len());

    let mut filtered = filter_articles(unique);
    info!("after filtering: {} articles", filtered.len());

    filtered.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    filtered.truncate(MAX_CANDIDATES);
    Ok(filtered)
}

async fn fetch_from_sources(provider: &dyn NewsProvider) -> Result<Vec<RawArticle>> {
    info!("fetching articles from target sources");
    let articles = provider
        .from_sources(&TARGET_SOURCES, SOURCES_PAGE_SIZE)
        .await
        .map_err(|e| Error::News(format!("failed to fetch from sources: {}", e)))?;
    info!("found {} articles from sources", articles.len());
    Ok(articles)
}

async fn fetch_by_keywords(provider: &dyn NewsProvider) -> Vec<RawArticle> {
    info!("fetching articles by topic keywords");
    let mut articles = Vec::new();
    for keyword in TARGET_KEYWORDS {
        match provider.search(keyword, KEYWORD_PAGE_SIZE).await {
            Ok(found) => articles.extend(found),
            Err(e) => warn!("keyword query {:?} failed, skipping: {}", keyword, e),
        }
    }
    info!("found {} articles by keyword", articles.len());
    articles
}

/// First occurrence of a URL wins. Articles without a URL are dropped
/// here; the filter would reject them anyway.
fn dedupe_by_url(articles: Vec<RawArticle>) -> Vec<RawArticle> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|article| match article.url.as_deref() {
            Some(url) => seen.insert(url.to_string()),
            None => false,
        })
        .collect()
}
