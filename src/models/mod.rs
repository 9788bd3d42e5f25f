//! Request and Response models for the cache client
//!
//! This module defines the envelopes serialized into and decoded out of
//! `/cache` request and response bodies, plus a typed command builder.

pub mod command;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use command::{CacheCommand, CacheValue};
pub use requests::CommandRequest;
pub use responses::CommandResponse;
