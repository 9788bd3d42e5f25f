//! Request DTOs for the cache client
//!
//! Defines the structure of outgoing HTTP request bodies.

use serde::{Deserialize, Serialize};

/// Request body for POST /cache
///
/// Serialized as `{"cmd": <command>}`. The client builds it around a
/// borrowed command (`CommandRequest<&C>`) so the caller's value is never
/// copied or mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest<T> {
    /// The command for the server to run
    pub cmd: T,
}

impl<T> CommandRequest<T> {
    /// Wraps a command in a request envelope
    pub fn new(cmd: T) -> Self {
        Self { cmd }
    }
}
