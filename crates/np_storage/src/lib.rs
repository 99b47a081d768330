pub mod backends;
pub mod schema;

pub use backends::memory::MemoryStore;
pub use backends::mongo::MongoStore;

pub mod prelude {
    pub use crate::backends::mongo::MongoStore;
    pub use np_core::{ArticleStore, ChatStore, Result, StoreAdmin};
}
