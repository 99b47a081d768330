pub mod categorize;
pub mod client;
pub mod fetcher;
pub mod filter;
pub mod score;

pub use categorize::{categorize_article, publisher_logo};
pub use client::NewsApiClient;
pub use fetcher::fetch_top_articles;
pub use filter::filter_articles;
pub use score::select_best;

pub mod prelude {
    pub use crate::client::NewsApiClient;
    pub use np_core::{NewsProvider, RawArticle, Result};
}
