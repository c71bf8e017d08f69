pub mod bell;
pub mod documents;
