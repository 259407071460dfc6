//! REST client wrapper
//!
//! - `client` - request/response interceptors over `gloo-net`
//! - `error` - status code to `ApiError` mapping
//! - `retry` - exponential backoff for flaky endpoints
//! - `paging` - key collection over paginated listings

pub mod client;
pub mod error;
pub mod paging;
pub mod retry;

pub use client::{ApiClient, RequestOptions};
pub use error::ApiError;
pub use paging::collect_all_keys;
pub use retry::{retry_request, RetryPolicy};
