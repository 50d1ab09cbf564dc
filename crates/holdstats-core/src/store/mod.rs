//! Score store implementations.

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::InMemoryScoreStore;
pub use sqlite::SqliteScoreStore;
