//! # toon-codec
//!
//! An encoder and decoder for TOON (Token-Oriented Object Notation), a
//! compact, human-readable, indentation-based data format.
//!
//! ## What is TOON?
//!
//! TOON expresses the same trees as JSON (null, booleans, numbers,
//! strings, arrays, string-keyed objects) with far less syntax. Its
//! distinguishing feature is a **tabular shape** for arrays of similar
//! objects: the keys are written once in a header line, then each element
//! becomes one delimited row, which removes the per-row key repetition that
//! dominates JSON payloads. See the [`format`] module for the full wire
//! format.
//!
//! ## Quick start
//!
//! ```rust
//! use toon_codec::{decode, encode_value, toon, Options};
//!
//! let options = Options::default();
//!
//! let value = toon!({ "name": "Alice", "age": 30 });
//! let text = encode_value(&value, &options);
//! assert_eq!(text, "name: Alice\nage: 30");
//! assert_eq!(decode(&text, &options), value);
//! ```
//!
//! Arrays of similar objects come out tabular:
//!
//! ```rust
//! use toon_codec::{encode_value, toon, Options};
//!
//! let users = toon!([
//!     { "id": 1, "name": "Alice", "role": "admin" },
//!     { "id": 2, "name": "Bob", "role": "user" }
//! ]);
//! assert_eq!(
//!     encode_value(&users, &Options::default()),
//!     "[2]{id,name,role}:\n  1,Alice,admin\n  2,Bob,user"
//! );
//! ```
//!
//! ## Typed values
//!
//! Anything implementing serde's `Serialize`/`Deserialize` can go through
//! the codec:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123\nname: Alice\nactive: true");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ## Totality
//!
//! [`encode_value`] accepts every [`Value`] tree and [`decode`] produces a
//! value for every input string; neither returns a `Result`. The fallible
//! surface is the serde bridge ([`to_value`], [`from_value`] and friends)
//! and the I/O helpers.

pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use error::{Error, Result};
pub use map::Map;
pub use options::{Delimiter, Options};
pub use ser::ValueSerializer;
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Encodes any host value to TOON text.
///
/// This is the permissive front door: the input may be a [`Value`] tree, a
/// string holding a JSON document, or any `T: Serialize`. A string input
/// whose first non-whitespace character is `{` or `[` is tried as JSON
/// first; if it parses, the parsed tree is encoded, otherwise the string
/// itself is encoded as a scalar.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode, Options};
///
/// let toon = encode(&"{\"a\": 1, \"b\": [1, 2]}", &Options::default()).unwrap();
/// assert_eq!(toon, "a: 1\nb: 1,2");
///
/// // Not valid JSON: falls back to the string itself.
/// let toon = encode(&"{not json", &Options::default()).unwrap();
/// assert_eq!(toon, "\"{not json\"");
/// ```
///
/// # Errors
///
/// Returns an error only if the host value cannot be converted to a value
/// tree (see [`to_value`]).
pub fn encode<T>(input: &T, options: &Options) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(input)?;
    if let Value::String(s) = &value {
        let trimmed = s.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            if let Ok(parsed) = serde_json::from_str::<Value>(s) {
                return Ok(encode_value(&parsed, options));
            }
        }
    }
    Ok(encode_value(&value, options))
}

/// Encodes a [`Value`] tree to TOON text. Total: never fails.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode_value, toon, Options};
///
/// let value = toon!({ "colors": ["red", "green", "blue"] });
/// assert_eq!(encode_value(&value, &Options::default()), "colors: red,green,blue");
/// ```
#[must_use]
pub fn encode_value(value: &Value, options: &Options) -> String {
    ser::encode_value(value, options)
}

/// Decodes TOON text into a [`Value`] tree. Total: every input produces
/// some value.
///
/// The `indent` and `delimiter` options must match the ones the text was
/// encoded with; `length_marker` is ignored when decoding.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode, toon, Options};
///
/// let value = decode("key:", &Options::default());
/// assert_eq!(value, toon!({ "key": null }));
/// ```
#[must_use]
pub fn decode(input: &str, options: &Options) -> Value {
    de::decode_str(input, options)
}

/// Decodes TOON text and renders the result as pretty-printed JSON.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode_to_json, Options};
///
/// let json = decode_to_json("name: Alice", &Options::default()).unwrap();
/// assert_eq!(json, "{\n  \"name\": \"Alice\"\n}");
/// ```
///
/// # Errors
///
/// Returns an error if JSON rendering fails.
pub fn decode_to_json(input: &str, options: &Options) -> Result<String> {
    let value = decode(input, options);
    serde_json::to_string_pretty(&value).map_err(Error::custom)
}

/// Converts any `T: Serialize` to a [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_codec::to_value;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error for host shapes with no tree representation, such as
/// maps with non-string keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ser::ValueSerializer)
}

/// Converts a [`Value`] tree into any `T: Deserialize`.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::{from_value, toon};
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_value(toon!({ "x": 1, "y": 2 })).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the tree does not match the target type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(de::ValueDeserializer::new(value))
}

/// Serializes any `T: Serialize` to a TOON string with default options.
///
/// # Errors
///
/// Returns an error if the value cannot be converted to a value tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &Options::default())
}

/// Serializes any `T: Serialize` to a TOON string with custom options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{to_string_with_options, Delimiter, Options};
///
/// let tags = vec!["a", "b", "c"];
/// let options = Options::new().with_delimiter(Delimiter::Pipe);
/// assert_eq!(to_string_with_options(&tags, &options).unwrap(), "a|b|c");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted to a value tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &Options) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let tree = to_value(value)?;
    Ok(encode_value(&tree, options))
}

/// Deserializes a `T` from TOON text with default options.
///
/// # Errors
///
/// Returns an error if the decoded tree does not match the target type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &Options::default())
}

/// Deserializes a `T` from TOON text with custom options.
///
/// # Errors
///
/// Returns an error if the decoded tree does not match the target type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &Options) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode(s, options))
}

/// Serializes any `T: Serialize` to a writer with default options.
///
/// # Errors
///
/// Returns an error if serialization fails or the write fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &Options::default())
}

/// Serializes any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or the write fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &Options) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserializes a `T` from a byte slice of TOON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or the decoded tree
/// does not match the target type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let text = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(text)
}

/// Deserializes a `T` from an I/O stream of TOON text.
///
/// # Errors
///
/// Returns an error if reading fails or the decoded tree does not match
/// the target type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&text)
}
