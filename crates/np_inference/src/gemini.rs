use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use np_core::{Error, LanguageModel, Result};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model_name: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate(&self, prompt: String) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model_name
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Inference(format!(
                "generateContent request failed: {}",
                status
            )));
        }

        let body = response.json::<GenerateResponse>().await?;
        body.candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| Error::Inference("model returned no candidates".to_string()))
    }
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn quick_summary(&self, title: &str, content: &str) -> Result<String> {
        let prompt = format!(
            "Please provide a brief, AI-generated summary of the following article in 2-3 sentences. \
             Focus on the key points and main takeaways:\n\n\
             Title: {}\n\nContent: {}\n\nSummary:",
            title, content
        );
        self.generate(prompt).await
    }

    async fn detailed_summary(&self, title: &str, content: &str) -> Result<String> {
        let prompt = format!(
            "Please provide a detailed, AI-generated summary of the following article. \
             Write it in two well-structured paragraphs that capture the main points and implications:\n\n\
             Title: {}\n\nContent: {}\n\nDetailed Summary:",
            title, content
        );
        self.generate(prompt).await
    }

    async fn why_it_matters(&self, title: &str, content: &str) -> Result<String> {
        let prompt = format!(
            "Please write a \"Why it Matters\" section for the following article. \
             This should be a single paragraph that rephrases the article's content in a way that \
             resonates with AI enthusiasts and learners. Focus on the broader implications and \
             significance:\n\n\
             Title: {}\n\nContent: {}\n\nWhy it Matters:",
            title, content
        );
        self.generate(prompt).await
    }

    async fn answer_question(
        &self,
        question: &str,
        article_title: &str,
        article_context: &str,
    ) -> Result<String> {
        let prompt = format!(
            "You are an AI assistant helping users understand the following article. \
             Please provide a helpful and informative response to their question:\n\n\
             Article Title: {}\n\
             Article Content: {}\n\n\
             User Question: {}\n\nResponse:",
            article_title, article_context, question
        );
        self.generate(prompt).await
    }

    async fn ping(&self) -> Result<String> {
        self.generate(
            "Hello, this is a test. Please respond with \"Connection successful\".".to_string(),
        )
        .await
    }
}
