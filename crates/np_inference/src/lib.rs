pub mod gemini;
pub mod generator;
pub mod text;

pub use gemini::GeminiClient;
pub use generator::ContentGenerator;

pub mod prelude {
    pub use crate::generator::ContentGenerator;
    pub use np_core::{Article, LanguageModel, RawArticle, Result};
}
