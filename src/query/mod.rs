pub mod client;
pub mod fetcher;
pub mod types;

pub use client::QueryClient;
pub use fetcher::{HttpFetcher, QueryFetcher};
pub use types::{QueryError, QueryKey, QueryOptions, QueryState};
