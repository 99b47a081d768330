use std::collections::HashMap;
use std::fmt;

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed set of categories an article can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "AI")]
    Ai,
    Technology,
    Startups,
    Funding,
    #[serde(rename = "Machine Learning")]
    MachineLearning,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Ai,
        Category::Technology,
        Category::Startups,
        Category::Funding,
        Category::MachineLearning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ai => "AI",
            Category::Technology => "Technology",
            Category::Startups => "Startups",
            Category::Funding => "Funding",
            Category::MachineLearning => "Machine Learning",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Article as returned by the news provider, before any processing.
/// Most fields are nullable upstream; the filter weeds out records
/// missing the ones we require.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: RawSource,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl RawArticle {
    /// Title, url, image and source name are all mandatory downstream.
    pub fn has_required_fields(&self) -> bool {
        self.title.as_deref().map_or(false, |t| !t.is_empty())
            && self.url.as_deref().map_or(false, |u| !u.is_empty())
            && self.url_to_image.as_deref().map_or(false, |u| !u.is_empty())
            && self.source.name.as_deref().map_or(false, |n| !n.is_empty())
    }

    /// Lowercased title + description + content, for keyword matching.
    pub fn haystack(&self) -> String {
        format!(
            "{} {} {}",
            self.title.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
            self.content.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }

    /// Best-effort article body used as prompt material.
    pub fn content_string(&self) -> String {
        format!(
            "{}. {}. {}",
            self.title.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
            self.content.as_deref().unwrap_or_default()
        )
    }
}

/// Enriched, persisted article. Field names match the stored documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub cover_image: String,
    pub publisher_name: String,
    pub publisher_logo: String,
    pub author_name: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_posted: DateTime<Utc>,
    pub quick_summary: String,
    pub detailed_summary: String,
    pub why_it_matters: String,
    pub source_url: String,
    pub category: Category,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub text: String,
    pub is_user: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

/// Append-only conversation log for one (session, article) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub session_id: String,
    pub article_id: ObjectId,
    pub article_title: String,
    pub messages: Vec<ChatMessage>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Aggregate outcome of one pipeline run. Always returned, never thrown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub success: bool,
    pub processed_count: usize,
    pub saved_count: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStatus {
    pub total_articles: u64,
    pub categories: HashMap<String, u64>,
    pub recent_articles: Vec<Article>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_display() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("Sports"), None);
    }

    #[test]
    fn category_serializes_to_stored_values() {
        assert_eq!(
            serde_json::to_string(&Category::MachineLearning).unwrap(),
            "\"Machine Learning\""
        );
        assert_eq!(serde_json::to_string(&Category::Ai).unwrap(), "\"AI\"");
    }

    #[test]
    fn raw_article_required_fields() {
        let mut raw = RawArticle {
            title: Some("Title".into()),
            url: Some("https://example.com/a".into()),
            url_to_image: Some("https://example.com/a.jpg".into()),
            source: RawSource {
                id: None,
                name: Some("Example".into()),
            },
            ..Default::default()
        };
        assert!(raw.has_required_fields());

        raw.url_to_image = None;
        assert!(!raw.has_required_fields());
    }
}
