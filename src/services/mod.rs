pub mod analytics;
pub mod auth;
pub mod charts;
pub mod storage;
pub mod table;
