//! Upload adapters

pub mod http;

pub use http::{HttpUploader, InvalidEndpoint};
