pub mod details;
pub mod stock;
