pub mod api;
pub mod hook;
pub mod ui;
