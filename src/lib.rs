pub mod aggregator;
pub mod browser;
pub mod collector;
pub mod config;
pub mod parser;
pub mod schema;
pub mod url_list;
pub mod workout_id;
