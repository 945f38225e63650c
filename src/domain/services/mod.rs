pub mod actions;
pub mod chat;
pub mod clipboard;
pub mod item_parser;
pub mod listings;
pub mod markdown_table;
pub mod model_discovery;
pub mod posts;
pub mod workflow;
