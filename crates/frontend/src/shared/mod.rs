pub mod api_utils;
pub mod components;
pub mod confirm;
pub mod date_utils;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod registry;
pub mod resource;
