use async_trait::async_trait;

use crate::types::RawArticle;
use crate::Result;

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Most recent articles from a fixed set of publisher source ids,
    /// newest first.
    async fn from_sources(&self, sources: &[&str], page_size: u32) -> Result<Vec<RawArticle>>;

    /// Most recent articles matching a search query, newest first.
    async fn search(&self, query: &str, page_size: u32) -> Result<Vec<RawArticle>>;

    /// Connectivity check; returns the number of sources the provider
    /// reports for the technology category.
    async fn ping(&self) -> Result<usize>;
}
