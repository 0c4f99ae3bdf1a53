pub mod bookmarks;
pub mod error;
pub mod history;
pub mod lookup;
pub mod preprocess;
pub mod state;
pub mod store;
pub mod theme;

pub use error::{LookupError, StoreError};
pub use state::DictionaryState;
pub use store::{FileStore, KeyValueStore, MemoryStore, PersistentStore, StoreKey};
