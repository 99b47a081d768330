use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bson::oid::ObjectId;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};
use uuid::Uuid;

use np_core::{Category, ChatMessage};
use np_pipeline::Pipeline;

use crate::envelope::{failure, failure_detail, success, success_message};
use crate::seed;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u64 = 20;
const RELATED_LIMIT: usize = 3;

#[derive(Deserialize)]
pub struct ListQuery {
    category: Option<String>,
    limit: Option<String>,
    page: Option<String>,
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Response {
    let limit = query
        .limit
        .as_deref()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .max(1);
    let page = query
        .page
        .as_deref()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1)
        .max(1);

    // An unknown category matches nothing rather than everything.
    let category = match query.category.as_deref() {
        None | Some("all") => None,
        Some(name) => match Category::parse(name) {
            Some(category) => Some(category),
            None => {
                return success(json!({
                    "articles": [],
                    "pagination": pagination(page, limit, 0),
                    "categories": {},
                }))
            }
        },
    };

    let articles = match state.articles.list_articles(category, limit, page).await {
        Ok(result) => result,
        Err(e) => {
            error!("error fetching articles: {}", e);
            return failure_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                "Failed to fetch articles",
            );
        }
    };
    let categories = match state.articles.category_counts().await {
        Ok(counts) => counts,
        Err(e) => {
            error!("error fetching category counts: {}", e);
            return failure_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                "Failed to fetch articles",
            );
        }
    };

    let (items, total) = articles;
    success(json!({
        "articles": items,
        "pagination": pagination(page, limit, total),
        "categories": categories,
    }))
}

fn pagination(page: u64, limit: u64, total: u64) -> serde_json::Value {
    let total_pages = total.div_ceil(limit);
    json!({
        "currentPage": page,
        "totalPages": total_pages,
        "totalCount": total,
        "hasNextPage": page < total_pages,
        "hasPrevPage": page > 1,
    })
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let id = match ObjectId::parse_str(&id) {
        Ok(id) => id,
        Err(_) => return failure(StatusCode::BAD_REQUEST, "Invalid article ID format"),
    };

    let article = match state.articles.get_article(&id).await {
        Ok(Some(article)) => article,
        Ok(None) => return failure(StatusCode::NOT_FOUND, "Article not found"),
        Err(e) => {
            error!("error fetching article: {}", e);
            return failure_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                "Failed to fetch article",
            );
        }
    };

    let related = match state
        .articles
        .related_articles(article.category, &id, RELATED_LIMIT)
        .await
    {
        Ok(related) => related,
        Err(e) => {
            error!("error fetching related articles: {}", e);
            return failure_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                "Failed to fetch article",
            );
        }
    };

    success(json!({ "article": article, "relatedArticles": related }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    question: Option<String>,
    article_id: Option<String>,
    session_id: Option<String>,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let (question, article_id) = match (
        request.question.filter(|q| !q.trim().is_empty()),
        request.article_id,
    ) {
        (Some(question), Some(article_id)) => (question, article_id),
        _ => {
            return failure(
                StatusCode::BAD_REQUEST,
                "Question and articleId are required",
            )
        }
    };

    let article_id = match ObjectId::parse_str(&article_id) {
        Ok(id) => id,
        Err(_) => return failure(StatusCode::BAD_REQUEST, "Invalid article ID format"),
    };

    let article = match state.articles.get_article(&article_id).await {
        Ok(Some(article)) => article,
        Ok(None) => return failure(StatusCode::NOT_FOUND, "Article not found"),
        Err(e) => {
            error!("error fetching article for chat: {}", e);
            return failure_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                "Failed to process chat message",
            );
        }
    };

    let context = format!(
        "{}\n\n{}\n\n{}",
        article.title, article.detailed_summary, article.why_it_matters
    );
    let answer = match state
        .model
        .answer_question(&question, &article.title, &context)
        .await
    {
        Ok(answer) => answer,
        Err(e) => {
            error!("error generating chat response: {}", e);
            return failure_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                "Failed to process chat message",
            );
        }
    };

    let session_id = request
        .session_id
        .unwrap_or_else(|| format!("session_{}", Uuid::new_v4().simple()));
    let now = Utc::now();
    let question_message = ChatMessage {
        text: question,
        is_user: true,
        timestamp: now,
    };
    let answer_message = ChatMessage {
        text: answer.clone(),
        is_user: false,
        timestamp: now,
    };

    // Persistence is best-effort; the answer goes back either way.
    if let Err(e) = state
        .chats
        .append_exchange(
            &session_id,
            &article_id,
            &article.title,
            question_message,
            answer_message,
        )
        .await
    {
        warn!("chat append failed, continuing without storage: {}", e);
    }

    success(json!({ "response": answer, "sessionId": session_id }))
}

pub async fn execute_pipeline(State(state): State<Arc<AppState>>) -> Response {
    let pipeline = Pipeline::new(
        state.news.clone(),
        state.model.clone(),
        state.articles.clone(),
    );
    let report = pipeline.execute().await;

    if report.success {
        let message = format!(
            "Successfully processed {} articles and saved {} to database",
            report.processed_count, report.saved_count
        );
        success_message(&message, json!({ "results": report }))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "message": "Data pipeline execution failed",
                "data": { "results": report },
            })),
        )
            .into_response()
    }
}

pub async fn pipeline_status(State(state): State<Arc<AppState>>) -> Response {
    let pipeline = Pipeline::new(
        state.news.clone(),
        state.model.clone(),
        state.articles.clone(),
    );
    match pipeline.status().await {
        Ok(status) => success(json!({ "status": status })),
        Err(e) => {
            error!("pipeline status error: {}", e);
            failure_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                "Failed to get pipeline status",
            )
        }
    }
}

pub async fn setup_database(State(state): State<Arc<AppState>>) -> Response {
    match state.admin.setup().await {
        Ok(()) => success_message(
            "Database collections created with validation rules and indexes",
            json!({}),
        ),
        Err(e) => {
            error!("database setup failed: {}", e);
            failure_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                "Failed to set up database",
            )
        }
    }
}

pub async fn clear_collections(State(state): State<Arc<AppState>>) -> Response {
    let articles = match state.articles.clear_articles().await {
        Ok(removed) => removed,
        Err(e) => {
            error!("clear collections failed: {}", e);
            return failure_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                "Failed to clear collections",
            );
        }
    };
    let chats = match state.chats.clear_sessions().await {
        Ok(removed) => removed,
        Err(e) => {
            error!("clear collections failed: {}", e);
            return failure_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                "Failed to clear collections",
            );
        }
    };

    success_message(
        "Collections cleared successfully",
        json!({ "cleared": { "articles": articles, "chats": chats } }),
    )
}

pub async fn insert_sample_data(State(state): State<Arc<AppState>>) -> Response {
    match seed::insert_sample_data(state.articles.as_ref(), state.chats.as_ref()).await {
        Ok(summary) => success_message("Sample data inserted successfully", summary),
        Err(e) => {
            error!("sample data insertion failed: {}", e);
            failure_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                "Failed to insert sample data",
            )
        }
    }
}

pub async fn test_connections(State(state): State<Arc<AppState>>) -> Response {
    let mongodb = match state.admin.ping().await {
        Ok(()) => service_status("success", "Successfully connected to MongoDB".to_string()),
        Err(e) => service_status("error", format!("MongoDB connection failed: {}", e)),
    };
    let news_api = match state.news.ping().await {
        Ok(count) => service_status(
            "success",
            format!("News API connected successfully. Found {} sources.", count),
        ),
        Err(e) => service_status("error", format!("News API connection failed: {}", e)),
    };
    let gemini = match state.model.ping().await {
        Ok(reply) => {
            let preview: String = reply.chars().take(100).collect();
            service_status(
                "success",
                format!("Gemini API connected successfully. Response: {}", preview),
            )
        }
        Err(e) => service_status("error", format!("Gemini API connection failed: {}", e)),
    };

    let all_ok = [&mongodb, &news_api, &gemini]
        .iter()
        .all(|s| s["status"] == "success");

    Json(json!({
        "success": true,
        "data": {
            "timestamp": Utc::now().to_rfc3339(),
            "services": {
                "mongodb": mongodb,
                "newsApi": news_api,
                "gemini": gemini,
            },
            "environment": {
                "mongodbUri": env_presence("MONGODB_URI"),
                "newsApiKey": env_presence("NEWS_API_KEY"),
                "googleApiKey": env_presence("GOOGLE_API_KEY"),
            },
            "overallStatus": if all_ok { "success" } else { "partial_failure" },
        },
        "message": if all_ok {
            "All services are connected and working correctly!"
        } else {
            "Some services failed to connect. Check the individual service statuses."
        },
    }))
    .into_response()
}

fn service_status(status: &str, message: String) -> serde_json::Value {
    json!({ "status": status, "message": message })
}

fn env_presence(name: &str) -> &'static str {
    if std::env::var(name).is_ok() {
        "Set"
    } else {
        "Not Set"
    }
}
