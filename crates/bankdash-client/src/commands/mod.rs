pub mod accounts;
pub mod analytics;
pub mod common;
pub mod history;
