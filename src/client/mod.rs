//! Client Module
//!
//! Sends commands to the cache server's `/cache` endpoint and decodes the
//! output.

mod cache_client;
pub mod decode;

#[cfg(test)]
mod property_tests;

pub use cache_client::CacheClient;
pub use decode::bytes_to_code_points;
