// Storage layer for the Notekeep server
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - Database: PostgreSQL repositories (sqlx)
// - InMemoryDatabase: lock-guarded maps with the same API
// - StorageBackend: enum dispatch over the two
// - password: Argon2id hashing, only ever called by the credential store

pub mod backend;
pub mod memory;
pub mod models;
pub mod password;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::Database;
