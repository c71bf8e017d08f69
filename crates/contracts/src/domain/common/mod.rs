//! Common types shared by all resource DTOs

pub mod list_query;
pub mod record;

// Re-exports
pub use list_query::ListQuery;
pub use record::{HasId, RecordStatus, Registry, StatusChange};
