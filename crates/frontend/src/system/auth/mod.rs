pub mod api;
pub mod context;
pub mod guard;
pub mod request;
pub mod session;
pub mod storage;
