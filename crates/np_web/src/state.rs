use std::sync::Arc;

use np_core::{ArticleStore, ChatStore, LanguageModel, NewsProvider, StoreAdmin};

/// Shared handles to the external services, constructed once at startup
/// and injected everywhere. Handlers never build their own clients.
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<dyn ArticleStore>,
    pub chats: Arc<dyn ChatStore>,
    pub admin: Arc<dyn StoreAdmin>,
    pub model: Arc<dyn LanguageModel>,
    pub news: Arc<dyn NewsProvider>,
}
