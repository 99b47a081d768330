pub mod config;
pub mod error;
pub mod models;
pub mod news;
pub mod storage;
pub mod types;

pub use config::Config;
pub use error::Error;
pub use models::LanguageModel;
pub use news::NewsProvider;
pub use storage::{ArticleStore, ChatStore, StoreAdmin};
pub use types::{
    Article, Category, ChatMessage, ChatSession, PipelineReport, PipelineStatus, RawArticle,
    RawSource,
};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::types::{Article, Category, ChatSession, RawArticle};
    pub use crate::{Error, Result};
}
