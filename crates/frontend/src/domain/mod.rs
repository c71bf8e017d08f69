pub mod a001_client;
pub mod a002_provider;
pub mod a003_product;
pub mod a004_warehouse;
pub mod a005_inventory;
pub mod a006_expiration;
pub mod a007_purchase_order;
pub mod a008_sale;
