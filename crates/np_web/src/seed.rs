//! Sample documents for demoing the UI without running the pipeline.

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use np_core::{Article, ArticleStore, Category, ChatMessage, ChatStore, Result};

fn sample_articles() -> Vec<Article> {
    let now = Utc::now();
    let article = |title: &str,
                   author: &str,
                   publisher: &str,
                   cover: &str,
                   posted: chrono::DateTime<Utc>,
                   quick: &str,
                   detailed: &str,
                   why: &str,
                   url: &str,
                   category: Category| Article {
        id: None,
        title: title.to_string(),
        cover_image: cover.to_string(),
        publisher_name: publisher.to_string(),
        publisher_logo:
            "https://images.unsplash.com/photo-1611224923853-80b023f02d71?w=100&h=100&fit=crop"
                .to_string(),
        author_name: author.to_string(),
        date_posted: posted,
        quick_summary: quick.to_string(),
        detailed_summary: detailed.to_string(),
        why_it_matters: why.to_string(),
        source_url: url.to_string(),
        category,
        created_at: now,
        updated_at: now,
    };

    vec![
        article(
            "OpenAI Unveils GPT-5 with Revolutionary Reasoning Capabilities",
            "Sarah Chen",
            "TechCrunch",
            "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=800&h=400&fit=crop",
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).single().unwrap_or(now),
            "OpenAI announces GPT-5 with advanced reasoning abilities, promising to revolutionize AI applications across industries.",
            "OpenAI has officially unveiled GPT-5, their most advanced language model to date, featuring unprecedented reasoning capabilities that allow it to solve complex problems across multiple domains. The new model demonstrates significant improvements in logical reasoning, mathematical problem-solving, and creative thinking compared to its predecessors.\n\nThe announcement comes after months of speculation and testing, with early users reporting remarkable improvements in code generation, scientific research assistance, and creative writing.",
            "This breakthrough represents a quantum leap in AI capabilities. For AI enthusiasts and learners, GPT-5's reasoning abilities open up new possibilities for human-AI collaboration, potentially accelerating scientific discoveries and creative innovations.",
            "https://techcrunch.com/2024/01/15/openai-gpt-5-reasoning",
            Category::Ai,
        ),
        article(
            "Tesla's Full Self-Driving Beta Reaches 99.9% Safety Milestone",
            "Marcus Johnson",
            "The Verge",
            "https://images.unsplash.com/photo-1560958089-b8a1929cea89?w=800&h=400&fit=crop",
            Utc.with_ymd_and_hms(2024, 1, 14, 14, 20, 0).single().unwrap_or(now),
            "Tesla's autonomous driving system achieves unprecedented safety levels, marking a major milestone in self-driving technology.",
            "Tesla has announced that its Full Self-Driving Beta has reached a 99.9% safety milestone, representing a significant advancement in autonomous vehicle technology. The achievement comes after extensive testing across millions of miles of real-world driving scenarios.\n\nThe milestone represents years of iterative development and machine learning optimization, with Tesla's neural networks processing vast amounts of driving data to improve decision-making capabilities.",
            "This milestone represents a paradigm shift in transportation technology, bringing us closer to a future where autonomous vehicles are demonstrably safer than human drivers. It showcases the power of iterative development and real-world data collection.",
            "https://theverge.com/2024/01/14/tesla-fsd-safety-milestone",
            Category::Technology,
        ),
        article(
            "Anthropic Raises $2.8B Series C to Scale AI Safety Research",
            "Emily Rodriguez",
            "Forbes",
            "https://images.unsplash.com/photo-1559136555-9303baea8ebd?w=800&h=400&fit=crop",
            Utc.with_ymd_and_hms(2024, 1, 13, 9, 15, 0).single().unwrap_or(now),
            "Anthropic secures massive funding round to accelerate AI safety research and responsible AI development.",
            "Anthropic, the AI safety company behind Claude, has raised $2.8 billion in Series C funding to accelerate its research into AI safety and alignment. The funding round was led by major tech investors and will be used to expand the company's research team and develop safer AI systems.\n\nThe investment reflects growing recognition of the importance of AI safety research as artificial intelligence systems become more powerful and widespread.",
            "This funding round highlights the critical importance of AI safety research in our rapidly advancing technological landscape. It demonstrates that responsible AI development is not just an academic concern but a business priority.",
            "https://forbes.com/2024/01/13/anthropic-funding-ai-safety",
            Category::Funding,
        ),
    ]
}

pub async fn insert_sample_data(
    articles: &dyn ArticleStore,
    chats: &dyn ChatStore,
) -> Result<Value> {
    let mut inserted_ids = Vec::new();
    for article in sample_articles() {
        let id = articles.insert_article(&article).await?;
        inserted_ids.push(id);
    }

    // One seeded exchange per demo session, against the first two
    // articles inserted above.
    let first_id = inserted_ids[0];
    let second_id = inserted_ids[1];

    let message = |text: &str, is_user: bool| ChatMessage {
        text: text.to_string(),
        is_user,
        timestamp: Utc::now(),
    };

    chats
        .append_exchange(
            "session_ai_article_001",
            &first_id,
            "OpenAI Unveils GPT-5 with Revolutionary Reasoning Capabilities",
            message("What are the key improvements in GPT-5 compared to previous versions?", true),
            message(
                "Based on the article, GPT-5 demonstrates significant improvements in logical \
                 reasoning, mathematical problem-solving, and creative thinking compared to its \
                 predecessors.",
                false,
            ),
        )
        .await?;
    chats
        .append_exchange(
            "session_tech_article_002",
            &second_id,
            "Tesla's Full Self-Driving Beta Reaches 99.9% Safety Milestone",
            message("How did Tesla achieve this safety milestone?", true),
            message(
                "According to the article, Tesla achieved this milestone through extensive \
                 testing across millions of miles of real-world driving scenarios.",
                false,
            ),
        )
        .await?;

    let ids: Vec<String> = inserted_ids.iter().map(|id| id.to_hex()).collect();
    Ok(json!({
        "articles": { "inserted": ids.len(), "ids": ids },
        "chats": { "inserted": 2 },
    }))
}
