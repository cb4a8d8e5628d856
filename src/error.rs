//! Error types for the TOON codec.
//!
//! The codec itself is total: [`encode_value`](crate::encode_value) accepts
//! any [`Value`](crate::Value) tree and [`decode`](crate::decode) produces
//! some value for every input, so neither returns a `Result`. Errors arise
//! only at the edges:
//!
//! - converting arbitrary host values through serde (`to_value`,
//!   `from_value`): unsupported shapes, non-string map keys, type
//!   mismatches
//! - writing to or reading from an I/O stream
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! // Map keys must be strings.
//! let bad: HashMap<u32, u32> = HashMap::from([(1, 2)]);
//! assert!(toon_codec::to_value(&bad).is_err());
//! ```

use std::fmt;
use thiserror::Error;

/// Errors produced by the serde bridge and the I/O helpers.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Host type with no representation in the value tree
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Anything else, including serde type mismatches
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an unsupported-type error for host values that cannot be
    /// converted to a value tree.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an I/O error.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
