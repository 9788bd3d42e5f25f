//! Cache Client - HTTP client for a cache server's command endpoint
//!
//! Sends `{"cmd": ...}` to `POST /cache` and decodes the output either as
//! JSON or from the raw first body chunk.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::CacheClient;
pub use config::{ClientConfig, DecodeMode, HeaderPolicy};
pub use error::{ClientError, Result};
pub use models::{CacheCommand, CacheValue};
