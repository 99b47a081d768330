use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Brief 2-3 sentence summary of an article.
    async fn quick_summary(&self, title: &str, content: &str) -> Result<String>;

    /// Two-paragraph detailed summary of an article.
    async fn detailed_summary(&self, title: &str, content: &str) -> Result<String>;

    /// Single-paragraph "why it matters" framing of an article.
    async fn why_it_matters(&self, title: &str, content: &str) -> Result<String>;

    /// Answer a reader's question about an article.
    async fn answer_question(
        &self,
        question: &str,
        article_title: &str,
        article_context: &str,
    ) -> Result<String>;

    /// Connectivity check; returns the model's raw reply.
    async fn ping(&self) -> Result<String>;
}
