//! Chat query adapters

pub mod http;

pub use http::HttpQueryClient;
