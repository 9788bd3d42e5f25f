//! Typed Cache Commands
//!
//! Builds the whitespace-separated command strings the cache server
//! understands:
//!
//! - `SET int <i64> <name>`
//! - `SET string "<text>" <name>`
//! - `GET <name>`
//! - `DEL <name>`

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{ClientError, Result};

// == Cache Value ==
/// A value stored by `SET`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheValue {
    Int(i64),
    Str(String),
}

// == Cache Command ==
/// One command for the cache server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheCommand {
    Set { name: String, value: CacheValue },
    Get { name: String },
    Del { name: String },
}

impl CacheCommand {
    pub fn set_int(name: impl Into<String>, value: i64) -> Self {
        CacheCommand::Set {
            name: name.into(),
            value: CacheValue::Int(value),
        }
    }

    pub fn set_str(name: impl Into<String>, value: impl Into<String>) -> Self {
        CacheCommand::Set {
            name: name.into(),
            value: CacheValue::Str(value.into()),
        }
    }

    pub fn get(name: impl Into<String>) -> Self {
        CacheCommand::Get { name: name.into() }
    }

    pub fn del(name: impl Into<String>) -> Self {
        CacheCommand::Del { name: name.into() }
    }

    /// Name of the variable the command acts on.
    pub fn name(&self) -> &str {
        match self {
            CacheCommand::Set { name, .. }
            | CacheCommand::Get { name }
            | CacheCommand::Del { name } => name,
        }
    }

    /// True if the first word of `input` is `SET`, `GET` or `DEL`, in any case.
    pub fn has_command_keyword(input: &str) -> bool {
        next_token(input).is_some_and(|(keyword, _)| {
            ["SET", "GET", "DEL"]
                .iter()
                .any(|k| keyword.eq_ignore_ascii_case(k))
        })
    }

    /// Checks that the command renders to a string the server can split
    /// back into the same parts.
    pub fn validate(&self) -> Result<()> {
        let name = self.name();
        if name.is_empty() {
            return Err(ClientError::Encode("Name cannot be empty".to_string()));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ClientError::Encode(format!(
                "Name '{}' cannot contain whitespace",
                name
            )));
        }
        if let CacheCommand::Set {
            value: CacheValue::Str(s),
            ..
        } = self
        {
            if s.contains('"') {
                return Err(ClientError::Encode(
                    "String value cannot contain a double quote".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for CacheCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheCommand::Set {
                name,
                value: CacheValue::Int(i),
            } => write!(f, "SET int {} {}", i, name),
            CacheCommand::Set {
                name,
                value: CacheValue::Str(s),
            } => write!(f, "SET string \"{}\" {}", s, name),
            CacheCommand::Get { name } => write!(f, "GET {}", name),
            CacheCommand::Del { name } => write!(f, "DEL {}", name),
        }
    }
}

// Goes on the wire as its command string.
impl Serialize for CacheCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// == Parsing ==
impl FromStr for CacheCommand {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        let (keyword, rest) =
            next_token(s).ok_or_else(|| ClientError::Encode("Empty command".to_string()))?;

        let cmd = match keyword.to_ascii_uppercase().as_str() {
            "GET" => CacheCommand::Get {
                name: only_name(rest)?,
            },
            "DEL" => CacheCommand::Del {
                name: only_name(rest)?,
            },
            "SET" => parse_set(rest)?,
            other => {
                return Err(ClientError::Encode(format!(
                    "Command not understood: {}",
                    other
                )))
            }
        };

        cmd.validate()?;
        Ok(cmd)
    }
}

fn parse_set(rest: &str) -> Result<CacheCommand> {
    let (vtype, rest) =
        next_token(rest).ok_or_else(|| ClientError::Encode("Type not found".to_string()))?;

    match vtype.to_ascii_lowercase().as_str() {
        "int" => {
            let (raw, rest) = next_token(rest)
                .ok_or_else(|| ClientError::Encode("Value not found".to_string()))?;
            let value = raw.parse::<i64>().map_err(|_| {
                ClientError::Encode(format!("Could not convert '{}' to integer", raw))
            })?;
            Ok(CacheCommand::Set {
                name: only_name(rest)?,
                value: CacheValue::Int(value),
            })
        }
        "string" => {
            let quoted = rest
                .trim_start()
                .strip_prefix('"')
                .ok_or_else(|| ClientError::Encode("String value must be quoted".to_string()))?;
            let end = quoted.find('"').ok_or_else(|| {
                ClientError::Encode("String may be missing a quotation mark".to_string())
            })?;
            Ok(CacheCommand::Set {
                name: only_name(&quoted[end + 1..])?,
                value: CacheValue::Str(quoted[..end].to_string()),
            })
        }
        other => Err(ClientError::Encode(format!("Type not found: {}", other))),
    }
}

/// Splits off the first whitespace-delimited token.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(i) => Some((&s[..i], &s[i..])),
        None => Some((s, "")),
    }
}

/// Expects exactly one remaining token.
fn only_name(rest: &str) -> Result<String> {
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(name), None) => Ok(name.to_string()),
        (None, _) => Err(ClientError::Encode("Name not found".to_string())),
        (Some(_), Some(extra)) => Err(ClientError::Encode(format!(
            "Unexpected trailing input: {}",
            extra
        ))),
    }
}
