use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tracing::{info, warn};

use np_core::{Article, Error, LanguageModel, RawArticle, Result};
use np_news::{categorize_article, publisher_logo};

use crate::text;

const QUICK_SUMMARY_MAX_CHARS: usize = 500;
const WHY_IT_MATTERS_MAX_CHARS: usize = 1000;
const DETAILED_MIN_WORDS: usize = 400;
const DETAILED_MAX_WORDS: usize = 600;
const DETAILED_WORD_BUDGET: usize = 500;

const BATCH_SIZE: usize = 3;
const BATCH_PAUSE: Duration = Duration::from_secs(2);

const PADDING_SENTENCE: &str = " This development represents a significant advancement in the \
     field and has important implications for the industry and users alike.";
const DETAILED_FALLBACK: &str = "This article discusses important developments in technology and \
     their implications for the industry.";
const WHY_FALLBACK: &str = "This development is significant for AI enthusiasts as it represents \
     important progress in the field and has implications for future technological advancement.";

/// Turns a raw article into a persisted one by asking the model for the
/// three generated text fields. Each field recovers from a failed
/// generation with a static fallback, so a single bad response never
/// sinks the article.
pub struct ContentGenerator {
    model: Arc<dyn LanguageModel>,
}

impl ContentGenerator {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    async fn quick_summary(&self, article: &RawArticle, title: &str) -> String {
        match self
            .model
            .quick_summary(title, &article.content_string())
            .await
        {
            Ok(summary) => {
                text::clamp_chars(&text::collapse_newlines(&summary), QUICK_SUMMARY_MAX_CHARS)
            }
            Err(e) => {
                warn!("quick summary generation failed: {}", e);
                // An empty description counts as absent.
                article
                    .description
                    .as_deref()
                    .filter(|d| !d.is_empty())
                    .map_or_else(|| title.to_string(), str::to_string)
            }
        }
    }

    async fn detailed_summary(&self, article: &RawArticle, title: &str) -> String {
        match self
            .model
            .detailed_summary(title, &article.content_string())
            .await
        {
            Ok(summary) => {
                let cleaned = text::collapse_blank_lines(&summary);
                let words = text::word_count(&cleaned);
                if words < DETAILED_MIN_WORDS {
                    cleaned + PADDING_SENTENCE
                } else if words > DETAILED_MAX_WORDS {
                    text::truncate_sentences(&cleaned, DETAILED_WORD_BUDGET)
                } else {
                    cleaned
                }
            }
            Err(e) => {
                warn!("detailed summary generation failed: {}", e);
                article
                    .description
                    .as_deref()
                    .filter(|d| !d.is_empty())
                    .map_or_else(|| DETAILED_FALLBACK.to_string(), str::to_string)
            }
        }
    }

    async fn why_it_matters(&self, article: &RawArticle, title: &str) -> String {
        match self
            .model
            .why_it_matters(title, &article.content_string())
            .await
        {
            Ok(section) => {
                text::clamp_chars(&text::collapse_newlines(&section), WHY_IT_MATTERS_MAX_CHARS)
            }
            Err(e) => {
                warn!("why-it-matters generation failed: {}", e);
                WHY_FALLBACK.to_string()
            }
        }
    }

    /// Generate all three fields for one article. The three requests
    /// run concurrently.
    pub async fn process_article(&self, article: &RawArticle) -> Result<Article> {
        let (title, url, image, publisher) = match (
            article.title.as_deref(),
            article.url.as_deref(),
            article.url_to_image.as_deref(),
            article.source.name.as_deref(),
        ) {
            (Some(t), Some(u), Some(i), Some(p)) => (t, u, i, p),
            _ => {
                return Err(Error::Inference(
                    "article is missing required fields".to_string(),
                ))
            }
        };

        info!("processing article: {}", title);

        let (quick_summary, detailed_summary, why_it_matters) = tokio::join!(
            self.quick_summary(article, title),
            self.detailed_summary(article, title),
            self.why_it_matters(article, title),
        );

        let now = Utc::now();
        Ok(Article {
            id: None,
            title: title.to_string(),
            cover_image: image.to_string(),
            publisher_name: publisher.to_string(),
            publisher_logo: publisher_logo(publisher),
            author_name: article
                .author
                .clone()
                .unwrap_or_else(|| "Unknown Author".to_string()),
            date_posted: article.published_at.unwrap_or(now),
            quick_summary,
            detailed_summary,
            why_it_matters,
            source_url: url.to_string(),
            category: categorize_article(article),
            created_at: now,
            updated_at: now,
        })
    }

    /// Process articles in fixed-size groups with a pause between
    /// groups, as a crude rate limiter for the upstream model. A failed
    /// article is logged and dropped; the batch carries on.
    pub async fn process_batch(&self, articles: Vec<RawArticle>) -> Vec<Article> {
        info!("processing {} articles", articles.len());
        let mut processed = Vec::with_capacity(articles.len());

        let total_batches = articles.len().div_ceil(BATCH_SIZE);
        for (batch_index, batch) in articles.chunks(BATCH_SIZE).enumerate() {
            info!("processing batch {}/{}", batch_index + 1, total_batches);

            let results = join_all(batch.iter().map(|article| self.process_article(article))).await;
            for (article, result) in batch.iter().zip(results) {
                match result {
                    Ok(done) => processed.push(done),
                    Err(e) => warn!(
                        "failed to process article {:?}: {}",
                        article.title.as_deref().unwrap_or("<untitled>"),
                        e
                    ),
                }
            }

            if batch_index + 1 < total_batches {
                tokio::time::sleep(BATCH_PAUSE).await;
            }
        }

        info!("successfully processed {} articles", processed.len());
        processed
    }
}
