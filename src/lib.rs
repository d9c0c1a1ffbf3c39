pub mod analysis;
pub mod api;
pub mod app_state;
pub mod config;
pub mod extractor;
pub mod feeds;
pub mod fetcher;
pub mod health;
pub mod middleware;
pub mod models;
pub mod sources;

pub use api::router;
