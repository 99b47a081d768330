use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::types::{Article, Category, ChatMessage, ChatSession};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert a new article. The storage layer enforces `sourceUrl`
    /// uniqueness; inserting a duplicate is an error.
    async fn insert_article(&self, article: &Article) -> Result<ObjectId>;

    /// Look up an article by its canonical source URL.
    async fn find_by_source_url(&self, source_url: &str) -> Result<Option<Article>>;

    /// Look up an article by id.
    async fn get_article(&self, id: &ObjectId) -> Result<Option<Article>>;

    /// One page of articles, newest first, plus the total count for the
    /// same filter.
    async fn list_articles(
        &self,
        category: Option<Category>,
        limit: u64,
        page: u64,
    ) -> Result<(Vec<Article>, u64)>;

    /// Articles sharing a category, excluding the given id, newest first.
    async fn related_articles(
        &self,
        category: Category,
        exclude: &ObjectId,
        limit: usize,
    ) -> Result<Vec<Article>>;

    /// Number of stored articles per category.
    async fn category_counts(&self) -> Result<HashMap<String, u64>>;

    /// Most recently created articles.
    async fn recent_articles(&self, limit: usize) -> Result<Vec<Article>>;

    async fn count_articles(&self) -> Result<u64>;

    /// Delete every stored article, returning how many were removed.
    async fn clear_articles(&self) -> Result<u64>;
}

#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Append a question/answer pair to the session keyed by
    /// `(session_id, article_id)`, creating the session if it does not
    /// exist yet. The append is a single conditional update so the two
    /// messages land together.
    async fn append_exchange(
        &self,
        session_id: &str,
        article_id: &ObjectId,
        article_title: &str,
        question: ChatMessage,
        answer: ChatMessage,
    ) -> Result<()>;

    async fn get_session(
        &self,
        session_id: &str,
        article_id: &ObjectId,
    ) -> Result<Option<ChatSession>>;

    async fn clear_sessions(&self) -> Result<u64>;
}

/// Administrative operations on the backing store, kept off the data
/// traits so request handlers cannot reach them by accident.
#[async_trait]
pub trait StoreAdmin: Send + Sync {
    /// Create both collections with their validators and indexes,
    /// dropping any previous versions.
    async fn setup(&self) -> Result<()>;

    /// Connectivity check.
    async fn ping(&self) -> Result<()>;
}
