pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{fetch, fetch_feed};
pub use errors::FetchError;
pub use pipeline::decode_lossy;
pub use types::{Charset, ContentKind, PageResponse};
