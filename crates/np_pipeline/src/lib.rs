//! Linear ingestion pipeline: clear, fetch, select, generate, persist.
//! There is no checkpointing and no retry across stages; a run either
//! finishes or reports why it stopped.

use std::sync::Arc;

use tracing::{error, info};

use np_core::{
    Article, ArticleStore, Error, LanguageModel, NewsProvider, PipelineReport, PipelineStatus,
    Result,
};
use np_inference::ContentGenerator;
use np_news::{fetch_top_articles, select_best};

const RECENT_ARTICLES: usize = 5;

pub struct Pipeline {
    news: Arc<dyn NewsProvider>,
    generator: ContentGenerator,
    store: Arc<dyn ArticleStore>,
}

impl Pipeline {
    pub fn new(
        news: Arc<dyn NewsProvider>,
        model: Arc<dyn LanguageModel>,
        store: Arc<dyn ArticleStore>,
    ) -> Self {
        Self {
            news,
            generator: ContentGenerator::new(model),
            store,
        }
    }

    /// Run the whole pipeline. Always returns a report; failures before
    /// any article is processed surface as a single error entry with
    /// `success: false`.
    pub async fn execute(&self) -> PipelineReport {
        match self.run().await {
            Ok(report) => report,
            Err(e) => {
                let message = format!("pipeline execution failed: {}", e);
                error!("{}", message);
                PipelineReport {
                    success: false,
                    processed_count: 0,
                    saved_count: 0,
                    errors: vec![message],
                }
            }
        }
    }

    async fn run(&self) -> Result<PipelineReport> {
        info!("starting pipeline run");

        info!("step 1: clearing existing articles");
        self.store.clear_articles().await?;

        info!("step 2: fetching articles from the news provider");
        let raw_articles = fetch_top_articles(self.news.as_ref()).await?;
        info!("fetched {} raw articles", raw_articles.len());
        if raw_articles.is_empty() {
            return Err(Error::News(
                "no articles fetched from news provider".to_string(),
            ));
        }

        info!("step 3: selecting best articles");
        let selected = select_best(raw_articles);
        info!("selected {} articles for processing", selected.len());

        info!("step 4: generating article content");
        let processed = self.generator.process_batch(selected).await;
        let processed_count = processed.len();

        info!("step 5: saving articles");
        let mut saved_count = 0;
        let mut errors = Vec::new();
        for article in &processed {
            match self.save_article(article).await {
                Ok(true) => saved_count += 1,
                Ok(false) => {}
                Err(e) => {
                    let message =
                        format!("failed to save article {:?}: {}", article.title, e);
                    error!("{}", message);
                    errors.push(message);
                }
            }
        }

        info!(
            "pipeline completed: {} processed, {} saved",
            processed_count, saved_count
        );
        Ok(PipelineReport {
            success: saved_count > 0,
            processed_count,
            saved_count,
            errors,
        })
    }

    /// Insert one article unless its source URL is already stored.
    /// Returns whether an insert happened. The existence check is
    /// advisory; the unique index is what actually guards against a
    /// concurrent double insert.
    async fn save_article(&self, article: &Article) -> Result<bool> {
        if self
            .store
            .find_by_source_url(&article.source_url)
            .await?
            .is_some()
        {
            info!("article already exists: {}", article.title);
            return Ok(false);
        }
        self.store.insert_article(article).await?;
        info!("saved article: {}", article.title);
        Ok(true)
    }

    pub async fn status(&self) -> Result<PipelineStatus> {
        Ok(PipelineStatus {
            total_articles: self.store.count_articles().await?,
            categories: self.store.category_counts().await?,
            recent_articles: self.store.recent_articles(RECENT_ARTICLES).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bson::oid::ObjectId;
    use chrono::{Duration, Utc};
    use np_core::{Category, RawArticle, RawSource};
    use np_storage::MemoryStore;
    use std::collections::HashMap;

    fn raw(url: &str, title: &str) -> RawArticle {
        RawArticle {
            title: Some(title.to_string()),
            description: Some(format!("{} in depth", title)),
            content: Some("body ".repeat(200)),
            url: Some(url.to_string()),
            url_to_image: Some("https://img.example.com/c.jpg".to_string()),
            published_at: Some(Utc::now() - Duration::hours(1)),
            source: RawSource {
                id: Some("techcrunch".to_string()),
                name: Some("TechCrunch".to_string()),
            },
            author: Some("Staff".to_string()),
        }
    }

    struct FakeProvider {
        articles: Vec<RawArticle>,
        fail: bool,
    }

    #[async_trait]
    impl NewsProvider for FakeProvider {
        async fn from_sources(&self, _: &[&str], _: u32) -> Result<Vec<RawArticle>> {
            if self.fail {
                return Err(Error::News("provider unavailable".to_string()));
            }
            Ok(self.articles.clone())
        }

        async fn search(&self, _: &str, _: u32) -> Result<Vec<RawArticle>> {
            Ok(vec![])
        }

        async fn ping(&self) -> Result<usize> {
            Ok(1)
        }
    }

    /// Model that fails one generation method for one specific title.
    struct FakeModel {
        failing_title: Option<String>,
    }

    impl FakeModel {
        fn answer_for(&self, title: &str, field: &str) -> Result<String> {
            if self.failing_title.as_deref() == Some(title) {
                return Err(Error::Inference("model overloaded".to_string()));
            }
            Ok(format!("{} for {} with enough detail to be useful", field, title))
        }
    }

    #[async_trait]
    impl LanguageModel for FakeModel {
        async fn quick_summary(&self, title: &str, _: &str) -> Result<String> {
            self.answer_for(title, "quick summary")
        }

        async fn detailed_summary(&self, title: &str, _: &str) -> Result<String> {
            self.answer_for(title, "detailed summary")
        }

        async fn why_it_matters(&self, title: &str, _: &str) -> Result<String> {
            self.answer_for(title, "why it matters")
        }

        async fn answer_question(&self, _: &str, _: &str, _: &str) -> Result<String> {
            Ok("answer".to_string())
        }

        async fn ping(&self) -> Result<String> {
            Ok("pong".to_string())
        }
    }

    /// Store whose clear is a no-op, standing in for an article that
    /// lands between the clearing stage and the persist stage (the
    /// check-then-insert race the unique index exists for).
    struct PersistentStore(MemoryStore);

    #[async_trait]
    impl ArticleStore for PersistentStore {
        async fn insert_article(&self, article: &Article) -> Result<ObjectId> {
            self.0.insert_article(article).await
        }

        async fn find_by_source_url(&self, url: &str) -> Result<Option<Article>> {
            self.0.find_by_source_url(url).await
        }

        async fn get_article(&self, id: &ObjectId) -> Result<Option<Article>> {
            self.0.get_article(id).await
        }

        async fn list_articles(
            &self,
            category: Option<Category>,
            limit: u64,
            page: u64,
        ) -> Result<(Vec<Article>, u64)> {
            self.0.list_articles(category, limit, page).await
        }

        async fn related_articles(
            &self,
            category: Category,
            exclude: &ObjectId,
            limit: usize,
        ) -> Result<Vec<Article>> {
            self.0.related_articles(category, exclude, limit).await
        }

        async fn category_counts(&self) -> Result<HashMap<String, u64>> {
            self.0.category_counts().await
        }

        async fn recent_articles(&self, limit: usize) -> Result<Vec<Article>> {
            self.0.recent_articles(limit).await
        }

        async fn count_articles(&self) -> Result<u64> {
            self.0.count_articles().await
        }

        async fn clear_articles(&self) -> Result<u64> {
            Ok(0)
        }
    }

    fn seeded_article(url: &str) -> Article {
        let now = Utc::now();
        Article {
            id: None,
            title: "already ingested".to_string(),
            cover_image: "https://img.example.com/c.jpg".to_string(),
            publisher_name: "TechCrunch".to_string(),
            publisher_logo: "https://img.example.com/logo.jpg".to_string(),
            author_name: "Staff".to_string(),
            date_posted: now,
            quick_summary: "A short summary of the story.".to_string(),
            detailed_summary: "A detailed summary long enough to satisfy the schema.".to_string(),
            why_it_matters: "It matters because it changes how the industry works.".to_string(),
            source_url: url.to_string(),
            category: Category::Technology,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn full_run_matches_expected_counts() {
        // Twelve unique articles, two of which trip the keyword filter.
        let mut articles = Vec::new();
        for i in 0..10 {
            articles.push(raw(
                &format!("https://a.example/{}", i),
                &format!("tech story {}", i),
            ));
        }
        articles.push(raw("https://a.example/pol", "election coverage"));
        articles.push(raw("https://a.example/mil", "military contract"));

        let store = Arc::new(PersistentStore(MemoryStore::new()));
        // One source URL is already present when persistence runs.
        store
            .insert_article(&seeded_article("https://a.example/3"))
            .await
            .unwrap();

        let pipeline = Pipeline::new(
            Arc::new(FakeProvider {
                articles,
                fail: false,
            }),
            Arc::new(FakeModel {
                // One article falls back to static text but still counts.
                failing_title: Some("tech story 7".to_string()),
            }),
            store.clone(),
        );

        let report = pipeline.execute().await;
        assert!(report.success);
        assert_eq!(report.processed_count, 10);
        assert_eq!(report.saved_count, 9);
        assert!(report.errors.is_empty());
        assert_eq!(store.count_articles().await.unwrap(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn reingesting_the_same_url_stores_one_article() {
        let articles = vec![raw("https://a.example/only", "the one story")];
        let store = Arc::new(PersistentStore(MemoryStore::new()));
        let pipeline = Pipeline::new(
            Arc::new(FakeProvider {
                articles,
                fail: false,
            }),
            Arc::new(FakeModel {
                failing_title: None,
            }),
            store.clone(),
        );

        let first = pipeline.execute().await;
        assert_eq!(first.saved_count, 1);

        let second = pipeline.execute().await;
        assert_eq!(second.processed_count, 1);
        assert_eq!(second.saved_count, 0);
        assert!(second.errors.is_empty());
        assert_eq!(store.count_articles().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn provider_failure_yields_failed_report_not_panic() {
        let store = Arc::new(MemoryStore::new());
        let pipeline = Pipeline::new(
            Arc::new(FakeProvider {
                articles: vec![],
                fail: true,
            }),
            Arc::new(FakeModel {
                failing_title: None,
            }),
            store,
        );

        let report = pipeline.execute().await;
        assert!(!report.success);
        assert_eq!(report.processed_count, 0);
        assert_eq!(report.saved_count, 0);
        assert_eq!(report.errors.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn status_reports_totals_and_recent() {
        let articles = vec![
            raw("https://a.example/1", "ai breakthrough story"),
            raw("https://a.example/2", "display panel story"),
        ];
        let store = Arc::new(MemoryStore::new());
        let pipeline = Pipeline::new(
            Arc::new(FakeProvider {
                articles,
                fail: false,
            }),
            Arc::new(FakeModel {
                failing_title: None,
            }),
            store,
        );

        pipeline.execute().await;
        let status = pipeline.status().await.unwrap();
        assert_eq!(status.total_articles, 2);
        assert_eq!(status.recent_articles.len(), 2);
        assert_eq!(status.categories.values().sum::<u64>(), 2);
    }
}
