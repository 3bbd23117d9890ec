pub mod migrations;
pub mod repository;
pub mod store;

pub use repository::ReadingRepo;
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError};
