//! Local SQLite storage for word lists and preferences.

pub mod error;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use repository::{ListRepository, SettingsRepository, SqliteRepository, WordRepository};
