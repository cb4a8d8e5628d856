//! Configuration options for the TOON codec.
//!
//! - [`Options`]: indentation width, field delimiter, and length-marker
//!   toggle
//! - [`Delimiter`]: the field separator used inside tabular rows and inline
//!   primitive arrays
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{encode_value, toon, Delimiter, Options};
//!
//! let value = toon!({ "tags": ["a", "b", "c"] });
//!
//! let options = Options::new().with_delimiter(Delimiter::Pipe);
//! assert_eq!(encode_value(&value, &options), "tags: a|b|c");
//! ```

/// Field separator for tabular rows and inline primitive arrays.
///
/// Comma is the default and most compact; tab gives TSV-like rows; pipe
/// reads like a markdown table. `Custom` admits any other single character.
///
/// # Examples
///
/// ```rust
/// use toon_codec::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// assert_eq!(Delimiter::Custom(';').as_char(), ';');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Custom(char),
}

impl Delimiter {
    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Custom(c) => *c,
        }
    }
}

impl From<char> for Delimiter {
    fn from(c: char) -> Self {
        match c {
            ',' => Delimiter::Comma,
            '\t' => Delimiter::Tab,
            '|' => Delimiter::Pipe,
            other => Delimiter::Custom(other),
        }
    }
}

/// Codec configuration.
///
/// The decoder must be configured with the same `indent` and `delimiter` the
/// encoder used; `length_marker` only affects encoding (the decoder accepts
/// headers with or without a `[N]` prefix and never validates the count).
///
/// # Examples
///
/// ```rust
/// use toon_codec::{Delimiter, Options};
///
/// let options = Options::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Tab)
///     .with_length_marker(false);
/// assert_eq!(options.indent, 4);
/// assert!(!options.length_marker);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Spaces per nesting level. Must be positive; the default is 2.
    pub indent: usize,
    /// Field separator for tabular rows and inline primitive arrays.
    pub delimiter: Delimiter,
    /// When true, tabular headers are prefixed with `[N]` where `N` is the
    /// row count.
    pub length_marker: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            indent: 2,
            delimiter: Delimiter::default(),
            length_marker: true,
        }
    }
}

impl Options {
    /// Creates the default options (2-space indent, comma delimiter, length
    /// markers on).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables the `[N]` row-count prefix on tabular headers.
    #[must_use]
    pub fn with_length_marker(mut self, length_marker: bool) -> Self {
        self.length_marker = length_marker;
        self
    }
}
