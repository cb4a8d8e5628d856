//! TOON format reference
//!
//! This module documents the TOON (Token-Oriented Object Notation) wire
//! format as this crate reads and writes it. It contains no code.
//!
//! # Overview
//!
//! TOON is a compact, indentation-based text format. Compared to JSON it
//! drops braces, brackets, and most quotes; its signature feature is a
//! tabular shape for arrays of similar objects that writes each key once
//! instead of once per row. The text is UTF-8 with LF line separators and
//! no BOM.
//!
//! # Objects
//!
//! One line per entry, in insertion order, `key: value`:
//!
//! ```text
//! name: Alice
//! age: 30
//! active: true
//! ```
//!
//! A nested object moves to the following lines, one indent level deeper
//! (default 2 spaces):
//!
//! ```text
//! user:
//!   name: Alice
//!   verified: true
//! ```
//!
//! Empty containers stay on the key's line: `config: {}`, `tags: []`. At
//! the top level an empty object is the two characters `{}` and an empty
//! array is `[]`.
//!
//! # Scalars and quoting
//!
//! | Type | Syntax |
//! |------|--------|
//! | Null | `null` |
//! | Boolean | `true`, `false` |
//! | Integer | `42`, `-7` |
//! | Float | `19.99`, `-0.5` (always at least one fractional digit) |
//! | String | unquoted when unambiguous, otherwise `"quoted"` |
//!
//! A string must be quoted when it:
//!
//! - is empty
//! - starts or ends with a space
//! - contains any of `, : [ ] { } #`, a newline, carriage return, or tab
//! - contains the active delimiter
//! - reads as `true`, `false`, or `null`
//! - reads as a number (`^-?\d+(\.\d+)?$`)
//!
//! Inside quotes exactly two escapes exist: `\\` and `\"`. Any other
//! backslash sequence is literal text.
//!
//! # Arrays
//!
//! Non-empty arrays take one of three shapes, tried in this order.
//!
//! ## Tabular
//!
//! An array qualifies when every element is an object and each element
//! shares at least 80 % (rounded up) of the first element's keys. The
//! header lists the union of all keys in first-seen order; each row lists
//! the values positionally, `null` standing in for a missing key:
//!
//! ```text
//! [3]{id,name,price}:
//!   1,Widget,9.99
//!   2,Gadget,14.99
//!   3,Tool,19.99
//! ```
//!
//! The `[3]` count prefix is controlled by the `length_marker` option. The
//! decoder accepts headers with or without it and never checks the count
//! against the actual row count. Rows end where the indentation falls back
//! to the header's level or a `key:` line appears.
//!
//! ## Inline
//!
//! An array of primitives is written as its values joined by the
//! delimiter, with no brackets:
//!
//! ```text
//! colors: red,green,blue
//! ```
//!
//! ## Dashed list
//!
//! Anything else gets one `- ` item per element. An element whose own
//! encoding spans multiple lines is placed under a bare dash, indented one
//! level deeper:
//!
//! ```text
//! - string
//! - 42
//! -
//!   name: Alice
//!   role: admin
//! ```
//!
//! # Delimiters
//!
//! The field separator for tabular rows and inline arrays defaults to a
//! comma; tab and pipe are the other conventional choices and any single
//! character is accepted. Encoder and decoder must agree on it. The
//! delimiter is never escaped; fields containing it are quoted instead.
//!
//! # Decoding is total
//!
//! Every input decodes to some value. There are no syntax errors: a
//! malformed header yields an empty array, a dedent closes the enclosing
//! block, a stray quote toggles quoting until the end of the line, and a
//! short tabular row simply leaves the surplus fields unbound.
//!
//! # Known one-way encodings
//!
//! A handful of shapes encode unambiguously but read back as something
//! simpler:
//!
//! - a single-element primitive array has no delimiter, so it reads back
//!   as its lone scalar
//! - single-line items in a dashed list are scalars to the reader, so
//!   `- {}` and `- []` come back as the strings `"{}"` and `"[]"`, and
//!   `- key: value` comes back as the string `key: value`
//! - a string containing a raw newline is quoted but splits across lines
//! - top-level `{}` / `[]` read back as strings
//! - an unquoted key starting with `-` reads as a list item, closing the
//!   enclosing object
//!
//! Callers who need a faithful round trip for such data should avoid mixed
//! arrays with single-line container elements and one-element primitive
//! arrays.

// Documentation only.
