use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::options::{
    CreateCollectionOptions, FindOptions, IndexOptions, UpdateOptions, ValidationAction,
    ValidationLevel,
};
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{info, warn};

use np_core::{
    Article, ArticleStore, Category, ChatMessage, ChatSession, ChatStore, Error, Result,
    StoreAdmin,
};

use crate::schema;

pub const ARTICLES_COLLECTION: &str = "articles";
pub const CHATS_COLLECTION: &str = "chats";

/// MongoDB-backed store for both collections. One instance per process,
/// shared behind an `Arc`; the driver pools connections internally.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        info!("connected to MongoDB database {:?}", db.name());
        Ok(Self { db })
    }

    fn articles(&self) -> Collection<Article> {
        self.db.collection(ARTICLES_COLLECTION)
    }

    fn chats(&self) -> Collection<ChatSession> {
        self.db.collection(CHATS_COLLECTION)
    }

    async fn create_validated_collection(&self, name: &str, validator: Document) -> Result<()> {
        // A drop failure here just means the collection did not exist.
        if let Err(e) = self.db.collection::<Document>(name).drop(None).await {
            warn!("dropping collection {:?} failed: {}", name, e);
        }

        let options = CreateCollectionOptions::builder()
            .validator(validator)
            .validation_level(ValidationLevel::Strict)
            .validation_action(ValidationAction::Error)
            .build();
        self.db.create_collection(name, options).await?;
        info!("created collection {:?} with validation rules", name);
        Ok(())
    }

    async fn create_article_indexes(&self) -> Result<()> {
        let articles = self.articles();
        articles
            .create_index(IndexModel::builder().keys(doc! { "category": 1 }).build(), None)
            .await?;
        articles
            .create_index(
                IndexModel::builder().keys(doc! { "datePosted": -1 }).build(),
                None,
            )
            .await?;
        articles
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "sourceUrl": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
                None,
            )
            .await?;
        articles
            .create_index(
                IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
                None,
            )
            .await?;
        Ok(())
    }

    async fn create_chat_indexes(&self) -> Result<()> {
        let chats = self.chats();
        chats
            .create_index(IndexModel::builder().keys(doc! { "sessionId": 1 }).build(), None)
            .await?;
        chats
            .create_index(IndexModel::builder().keys(doc! { "articleId": 1 }).build(), None)
            .await?;
        chats
            .create_index(
                IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
                None,
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for MongoStore {
    async fn insert_article(&self, article: &Article) -> Result<ObjectId> {
        let result = self.articles().insert_one(article, None).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| Error::Storage("insert did not return an ObjectId".to_string()))
    }

    async fn find_by_source_url(&self, source_url: &str) -> Result<Option<Article>> {
        let article = self
            .articles()
            .find_one(doc! { "sourceUrl": source_url }, None)
            .await?;
        Ok(article)
    }

    async fn get_article(&self, id: &ObjectId) -> Result<Option<Article>> {
        let article = self.articles().find_one(doc! { "_id": id }, None).await?;
        Ok(article)
    }

    async fn list_articles(
        &self,
        category: Option<Category>,
        limit: u64,
        page: u64,
    ) -> Result<(Vec<Article>, u64)> {
        let mut filter = doc! {};
        if let Some(category) = category {
            filter.insert("category", category.as_str());
        }

        // Saturate so an absurd caller-supplied page cannot overflow
        // the skip offset.
        let skip = page.saturating_sub(1).saturating_mul(limit);
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .skip(skip)
            .limit(limit as i64)
            .build();

        let articles = self
            .articles()
            .find(filter.clone(), options)
            .await?
            .try_collect()
            .await?;
        let total = self.articles().count_documents(filter, None).await?;
        Ok((articles, total))
    }

    async fn related_articles(
        &self,
        category: Category,
        exclude: &ObjectId,
        limit: usize,
    ) -> Result<Vec<Article>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .limit(limit as i64)
            .build();
        let related = self
            .articles()
            .find(
                doc! { "category": category.as_str(), "_id": { "$ne": exclude } },
                options,
            )
            .await?
            .try_collect()
            .await?;
        Ok(related)
    }

    async fn category_counts(&self) -> Result<HashMap<String, u64>> {
        let pipeline = vec![
            doc! { "$group": { "_id": "$category", "count": { "$sum": 1 } } },
            doc! { "$sort": { "count": -1 } },
        ];
        let mut cursor = self.articles().aggregate(pipeline, None).await?;

        let mut counts = HashMap::new();
        while let Some(entry) = cursor.try_next().await? {
            let category = entry.get_str("_id").unwrap_or_default().to_string();
            let count = match entry.get("count") {
                Some(Bson::Int32(n)) => *n as u64,
                Some(Bson::Int64(n)) => *n as u64,
                _ => 0,
            };
            counts.insert(category, count);
        }
        Ok(counts)
    }

    async fn recent_articles(&self, limit: usize) -> Result<Vec<Article>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .limit(limit as i64)
            .build();
        let articles = self
            .articles()
            .find(doc! {}, options)
            .await?
            .try_collect()
            .await?;
        Ok(articles)
    }

    async fn count_articles(&self) -> Result<u64> {
        let count = self.articles().count_documents(doc! {}, None).await?;
        Ok(count)
    }

    async fn clear_articles(&self) -> Result<u64> {
        let result = self.articles().delete_many(doc! {}, None).await?;
        info!("cleared {} articles", result.deleted_count);
        Ok(result.deleted_count)
    }
}

#[async_trait]
impl ChatStore for MongoStore {
    async fn append_exchange(
        &self,
        session_id: &str,
        article_id: &ObjectId,
        article_title: &str,
        question: ChatMessage,
        answer: ChatMessage,
    ) -> Result<()> {
        let now = bson::DateTime::now();
        let update = doc! {
            "$set": {
                "articleTitle": article_title,
                "updatedAt": now,
            },
            "$push": {
                "messages": { "$each": [bson::to_bson(&question)?, bson::to_bson(&answer)?] }
            },
            "$setOnInsert": {
                "sessionId": session_id,
                "articleId": article_id,
                "createdAt": now,
            },
        };

        self.chats()
            .update_one(
                doc! { "sessionId": session_id, "articleId": article_id },
                update,
                UpdateOptions::builder().upsert(true).build(),
            )
            .await?;
        Ok(())
    }

    async fn get_session(
        &self,
        session_id: &str,
        article_id: &ObjectId,
    ) -> Result<Option<ChatSession>> {
        let session = self
            .chats()
            .find_one(doc! { "sessionId": session_id, "articleId": article_id }, None)
            .await?;
        Ok(session)
    }

    async fn clear_sessions(&self) -> Result<u64> {
        let result = self.chats().delete_many(doc! {}, None).await?;
        Ok(result.deleted_count)
    }
}

#[async_trait]
impl StoreAdmin for MongoStore {
    async fn setup(&self) -> Result<()> {
        self.create_validated_collection(ARTICLES_COLLECTION, schema::articles_validator())
            .await?;
        self.create_article_indexes().await?;
        self.create_validated_collection(CHATS_COLLECTION, schema::chats_validator())
            .await?;
        self.create_chat_indexes().await?;
        info!("database setup complete");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
