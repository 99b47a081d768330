use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use tokio::sync::RwLock;

use np_core::{
    Article, ArticleStore, Category, ChatMessage, ChatSession, ChatStore, Error, Result,
    StoreAdmin,
};

/// In-memory twin of the Mongo backend, used by tests and local runs
/// without a database. Mirrors the storage-level behavior that matters:
/// the unique `sourceUrl` constraint and the conditional chat upsert.
#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: RwLock<Vec<Article>>,
    chats: RwLock<Vec<ChatSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn insert_article(&self, article: &Article) -> Result<ObjectId> {
        let mut articles = self.articles.write().await;
        // Stand-in for the unique index on sourceUrl.
        if articles.iter().any(|a| a.source_url == article.source_url) {
            return Err(Error::Storage(format!(
                "duplicate key: sourceUrl {:?}",
                article.source_url
            )));
        }
        let id = ObjectId::new();
        let mut stored = article.clone();
        stored.id = Some(id);
        articles.push(stored);
        Ok(id)
    }

    async fn find_by_source_url(&self, source_url: &str) -> Result<Option<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.iter().find(|a| a.source_url == source_url).cloned())
    }

    async fn get_article(&self, id: &ObjectId) -> Result<Option<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.iter().find(|a| a.id.as_ref() == Some(id)).cloned())
    }

    async fn list_articles(
        &self,
        category: Option<Category>,
        limit: u64,
        page: u64,
    ) -> Result<(Vec<Article>, u64)> {
        let articles = self.articles.read().await;
        let mut matching: Vec<Article> = articles
            .iter()
            .filter(|a| category.map_or(true, |c| a.category == c))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let skip = page.saturating_sub(1).saturating_mul(limit) as usize;
        let page_items = matching
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .collect();
        Ok((page_items, total))
    }

    async fn related_articles(
        &self,
        category: Category,
        exclude: &ObjectId,
        limit: usize,
    ) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        let mut related: Vec<Article> = articles
            .iter()
            .filter(|a| a.category == category && a.id.as_ref() != Some(exclude))
            .cloned()
            .collect();
        related.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        related.truncate(limit);
        Ok(related)
    }

    async fn category_counts(&self) -> Result<HashMap<String, u64>> {
        let articles = self.articles.read().await;
        let mut counts = HashMap::new();
        for article in articles.iter() {
            *counts.entry(article.category.to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn recent_articles(&self, limit: usize) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        let mut recent: Vec<Article> = articles.iter().cloned().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn count_articles(&self) -> Result<u64> {
        Ok(self.articles.read().await.len() as u64)
    }

    async fn clear_articles(&self) -> Result<u64> {
        let mut articles = self.articles.write().await;
        let removed = articles.len() as u64;
        articles.clear();
        Ok(removed)
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn append_exchange(
        &self,
        session_id: &str,
        article_id: &ObjectId,
        article_title: &str,
        question: ChatMessage,
        answer: ChatMessage,
    ) -> Result<()> {
        let mut chats = self.chats.write().await;
        let now = Utc::now();

        if let Some(session) = chats
            .iter_mut()
            .find(|s| s.session_id == session_id && &s.article_id == article_id)
        {
            session.messages.push(question);
            session.messages.push(answer);
            session.article_title = article_title.to_string();
            session.updated_at = now;
        } else {
            chats.push(ChatSession {
                id: Some(ObjectId::new()),
                session_id: session_id.to_string(),
                article_id: *article_id,
                article_title: article_title.to_string(),
                messages: vec![question, answer],
                created_at: now,
                updated_at: now,
            });
        }
        Ok(())
    }

    async fn get_session(
        &self,
        session_id: &str,
        article_id: &ObjectId,
    ) -> Result<Option<ChatSession>> {
        let chats = self.chats.read().await;
        Ok(chats
            .iter()
            .find(|s| s.session_id == session_id && &s.article_id == article_id)
            .cloned())
    }

    async fn clear_sessions(&self) -> Result<u64> {
        let mut chats = self.chats.write().await;
        let removed = chats.len() as u64;
        chats.clear();
        Ok(removed)
    }
}

#[async_trait]
impl StoreAdmin for MemoryStore {
    async fn setup(&self) -> Result<()> {
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn article(source_url: &str, category: Category, age_minutes: i64) -> Article {
        let now = Utc::now() - Duration::minutes(age_minutes);
        Article {
            id: None,
            title: format!("story at {}", source_url),
            cover_image: "https://img.example.com/c.jpg".to_string(),
            publisher_name: "TechCrunch".to_string(),
            publisher_logo: "https://img.example.com/logo.jpg".to_string(),
            author_name: "Staff".to_string(),
            date_posted: now,
            quick_summary: "A short summary of the story.".to_string(),
            detailed_summary: "A detailed summary long enough to satisfy the schema.".to_string(),
            why_it_matters: "It matters because it changes how the industry works.".to_string(),
            source_url: source_url.to_string(),
            category,
            created_at: now,
            updated_at: now,
        }
    }

    fn message(text: &str, is_user: bool) -> ChatMessage {
        ChatMessage {
            text: text.to_string(),
            is_user,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn duplicate_source_url_is_rejected() {
        let store = MemoryStore::new();
        store
            .insert_article(&article("https://a.example/1", Category::Ai, 0))
            .await
            .unwrap();

        let err = store
            .insert_article(&article("https://a.example/1", Category::Technology, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(store.count_articles().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn listing_paginates_newest_first() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .insert_article(&article(
                    &format!("https://a.example/{}", i),
                    Category::Ai,
                    i,
                ))
                .await
                .unwrap();
        }

        let (page_one, total) = store.list_articles(None, 2, 1).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(page_one.len(), 2);
        // Article 0 is the newest.
        assert_eq!(page_one[0].source_url, "https://a.example/0");

        let (page_three, _) = store.list_articles(None, 2, 3).await.unwrap();
        assert_eq!(page_three.len(), 1);
    }

    #[tokio::test]
    async fn huge_page_numbers_yield_an_empty_page() {
        let store = MemoryStore::new();
        store
            .insert_article(&article("https://a.example/1", Category::Ai, 0))
            .await
            .unwrap();

        // The skip offset saturates instead of overflowing.
        let (items, total) = store.list_articles(None, 20, u64::MAX).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn category_filter_and_counts() {
        let store = MemoryStore::new();
        store
            .insert_article(&article("https://a.example/1", Category::Ai, 0))
            .await
            .unwrap();
        store
            .insert_article(&article("https://a.example/2", Category::Ai, 1))
            .await
            .unwrap();
        store
            .insert_article(&article("https://a.example/3", Category::Funding, 2))
            .await
            .unwrap();

        let (ai_articles, ai_total) = store
            .list_articles(Some(Category::Ai), 20, 1)
            .await
            .unwrap();
        assert_eq!(ai_total, 2);
        assert_eq!(ai_articles.len(), 2);

        let counts = store.category_counts().await.unwrap();
        assert_eq!(counts.get("AI"), Some(&2));
        assert_eq!(counts.get("Funding"), Some(&1));
    }

    #[tokio::test]
    async fn related_articles_exclude_self() {
        let store = MemoryStore::new();
        let id = store
            .insert_article(&article("https://a.example/1", Category::Ai, 0))
            .await
            .unwrap();
        store
            .insert_article(&article("https://a.example/2", Category::Ai, 1))
            .await
            .unwrap();
        store
            .insert_article(&article("https://a.example/3", Category::Technology, 2))
            .await
            .unwrap();

        let related = store.related_articles(Category::Ai, &id, 3).await.unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].source_url, "https://a.example/2");
    }

    #[tokio::test]
    async fn chat_upsert_appends_two_messages_per_exchange() {
        let store = MemoryStore::new();
        let article_id = ObjectId::new();

        store
            .append_exchange(
                "session_test_0001",
                &article_id,
                "Quantum chip ships",
                message("what is this about?", true),
                message("a quantum chip", false),
            )
            .await
            .unwrap();
        store
            .append_exchange(
                "session_test_0001",
                &article_id,
                "Quantum chip ships",
                message("who makes it?", true),
                message("a startup", false),
            )
            .await
            .unwrap();

        let session = store
            .get_session("session_test_0001", &article_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.messages.len(), 4);
        assert!(session.messages[0].is_user);
        assert!(!session.messages[1].is_user);

        // Same session against a different article is a separate log.
        let other_article = ObjectId::new();
        store
            .append_exchange(
                "session_test_0001",
                &other_article,
                "Other story",
                message("hi", true),
                message("hello", false),
            )
            .await
            .unwrap();
        let session = store
            .get_session("session_test_0001", &article_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.messages.len(), 4);
    }
}
