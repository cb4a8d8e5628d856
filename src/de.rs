//! TOON decoding.
//!
//! The decoder splits its input into lines and walks them with a cursor,
//! classifying each line by its prefix shape: a tabular header (`{…}:` or
//! `[N]{…}:`), a dashed list item (`-`), a key line (an unquoted colon), or
//! a bare scalar. Indentation is the only block delimiter; a line indented
//! less than its container closes that container.
//!
//! Decoding is **total**: there is no syntax error. A malformed tabular
//! header yields an empty array, unexpected indentation simply ends the
//! enclosing block, and a stray quote toggles quoting until the end of the
//! line.
//!
//! ## Usage
//!
//! ```rust
//! use toon_codec::{decode, Options};
//!
//! let value = decode("[2]{id,name}:\n  1,Alice\n  2,Bob", &Options::default());
//! let rows = value.as_array().unwrap();
//! assert_eq!(rows[0].as_object().unwrap().get("name").unwrap().as_str(), Some("Alice"));
//! ```

use crate::{Error, Map, Number, Options, Result, Value};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Decodes a complete TOON document. Total: every input produces a value.
pub(crate) fn decode_str(input: &str, options: &Options) -> Value {
    Parser::new(input, options).run()
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    step: usize,
    delimiter: char,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: &Options) -> Self {
        Parser {
            lines: input.split('\n').collect(),
            pos: 0,
            step: options.indent,
            delimiter: options.delimiter.as_char(),
        }
    }

    fn run(&mut self) -> Value {
        if self.lines.len() == 1 {
            let line = self.lines[0];
            if split_at_unquoted_colon(line).1.is_some() {
                return self.parse_hash(0);
            }
            let content = line.trim();
            if contains_unquoted(content, self.delimiter) && !is_wholly_quoted(content) {
                return self.parse_inline_row(content);
            }
            return parse_scalar(content);
        }
        self.parse_value(0)
    }

    fn parse_inline_row(&self, content: &str) -> Value {
        Value::Array(
            split_row(content, self.delimiter)
                .iter()
                .map(|field| parse_scalar(field))
                .collect(),
        )
    }

    fn parse_value(&mut self, expected_indent: usize) -> Value {
        let Some(line) = self.lines.get(self.pos).copied() else {
            return Value::Null;
        };
        let indent = indent_of(line);
        if indent < expected_indent {
            return Value::Null;
        }
        let content = line.trim();
        if is_tabular_header(content) {
            self.parse_tabular_array(indent)
        } else if content.starts_with('-') {
            self.parse_list_array(indent)
        } else if split_at_unquoted_colon(content).1.is_some() {
            self.parse_hash(indent)
        } else {
            self.pos += 1;
            parse_scalar(content)
        }
    }

    fn parse_hash(&mut self, expected_indent: usize) -> Value {
        let mut map = Map::new();
        while let Some(line) = self.lines.get(self.pos).copied() {
            if indent_of(line) < expected_indent {
                break;
            }
            let content = line.trim();
            if content.is_empty() || is_tabular_header(content) || content.starts_with('-') {
                break;
            }
            let (key_text, rest) = split_at_unquoted_colon(content);
            let Some(rest) = rest else {
                break;
            };
            let key = decode_key(key_text.trim());
            let rest = rest.trim();
            let value = if rest.is_empty() {
                self.pos += 1;
                // One line of lookahead: a tabular header may sit at the same
                // indent as its parent key.
                match self.lines.get(self.pos).copied() {
                    Some(next) if is_tabular_header(next.trim()) => {
                        self.parse_tabular_array(indent_of(next))
                    }
                    _ => self.parse_value(expected_indent),
                }
            } else {
                self.pos += 1;
                if rest == "[]" {
                    Value::Array(Vec::new())
                } else if rest == "{}" {
                    Value::Object(Map::new())
                } else if contains_unquoted(rest, self.delimiter) && !is_wholly_quoted(rest) {
                    self.parse_inline_row(rest)
                } else {
                    parse_scalar(rest)
                }
            };
            map.insert(key, value);
        }
        Value::Object(map)
    }

    fn parse_tabular_array(&mut self, expected_indent: usize) -> Value {
        let header = self
            .lines
            .get(self.pos)
            .copied()
            .and_then(|line| header_field_list(line.trim()));
        let Some(field_list) = header else {
            return Value::Array(Vec::new());
        };
        let fields: Vec<String> = field_list
            .split(self.delimiter)
            .map(|field| field.trim().to_string())
            .collect();
        self.pos += 1;

        let mut rows = Vec::new();
        while let Some(line) = self.lines.get(self.pos).copied() {
            if indent_of(line) <= expected_indent {
                break;
            }
            let content = line.trim();
            if content.is_empty() {
                break;
            }
            if split_at_unquoted_colon(content).1.is_some() && !is_tabular_header(content) {
                break;
            }
            let values = split_row(content, self.delimiter);
            // Positional pairing: surplus fields get no binding, surplus
            // values are dropped.
            let mut row = Map::new();
            for (field, value) in fields.iter().zip(values.iter()) {
                row.insert(field.clone(), parse_scalar(value));
            }
            rows.push(Value::Object(row));
            self.pos += 1;
        }
        Value::Array(rows)
    }

    fn parse_list_array(&mut self, expected_indent: usize) -> Value {
        let mut items = Vec::new();
        while let Some(line) = self.lines.get(self.pos).copied() {
            if indent_of(line) < expected_indent {
                break;
            }
            let content = line.trim();
            let Some(after_dash) = content.strip_prefix('-') else {
                break;
            };
            let rest = after_dash.strip_prefix(' ').unwrap_or(after_dash);
            self.pos += 1;
            if rest.is_empty() {
                items.push(self.parse_value(expected_indent + self.step));
            } else {
                items.push(parse_scalar(rest));
            }
        }
        Value::Array(items)
    }
}

fn indent_of(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Matches `^(\[\d+\])?\{[^}]+\}:$` and returns the field list between the
/// braces. The `[N]` count is accepted but never validated.
fn header_field_list(content: &str) -> Option<&str> {
    let mut rest = content;
    if let Some(after) = rest.strip_prefix('[') {
        let close = after.find(']')?;
        let digits = &after[..close];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        rest = &after[close + 1..];
    }
    let rest = rest.strip_prefix('{')?;
    let rest = rest.strip_suffix(':')?;
    let fields = rest.strip_suffix('}')?;
    if fields.is_empty() || fields.contains('}') {
        return None;
    }
    Some(fields)
}

fn is_tabular_header(content: &str) -> bool {
    header_field_list(content).is_some()
}

/// Position of the first `target` outside quotes. A `"` toggles the quoting
/// state unless it is preceded by a lone backslash.
fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    let mut prev: Option<char> = None;
    let mut prev2: Option<char> = None;
    for (idx, ch) in s.char_indices() {
        if ch == '"' {
            let escaped = prev == Some('\\') && prev2 != Some('\\');
            if !escaped {
                in_quotes = !in_quotes;
            }
        } else if ch == target && !in_quotes {
            return Some(idx);
        }
        prev2 = prev;
        prev = Some(ch);
    }
    None
}

fn contains_unquoted(s: &str, target: char) -> bool {
    find_unquoted(s, target).is_some()
}

/// Splits at the first unquoted colon. `None` in the second slot means the
/// line has no key-value separator at all, as opposed to an empty value
/// after `key:`.
fn split_at_unquoted_colon(s: &str) -> (&str, Option<&str>) {
    match find_unquoted(s, ':') {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    }
}

/// Splits a delimited row into fields, quote-aware, each field stripped.
/// One trailing empty field (an extra delimiter at the end) is dropped.
fn split_row(s: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut prev: Option<char> = None;
    let mut prev2: Option<char> = None;
    for ch in s.chars() {
        if ch == '"' {
            let escaped = prev == Some('\\') && prev2 != Some('\\');
            if !escaped {
                in_quotes = !in_quotes;
            }
            current.push(ch);
        } else if ch == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
        prev2 = prev;
        prev = Some(ch);
    }
    fields.push(current.trim().to_string());
    if fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

fn is_wholly_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

fn decode_key(key: &str) -> String {
    if is_wholly_quoted(key) {
        unescape(&key[1..key.len() - 1])
    } else {
        key.to_string()
    }
}

/// Interprets one scalar lexeme. The caller has already stripped
/// surrounding whitespace.
fn parse_scalar(s: &str) -> Value {
    match s {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if crate::value::is_integer_literal(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Number(Number::Integer(i));
        }
        // Out of i64 range: degrade to a float rather than fail.
        if let Ok(f) = s.parse::<f64>() {
            return Value::Number(Number::Float(f));
        }
        return Value::String(s.to_string());
    }
    if crate::value::is_float_literal(s) {
        if let Ok(f) = s.parse::<f64>() {
            return Value::Number(Number::Float(f));
        }
        return Value::String(s.to_string());
    }
    if is_wholly_quoted(s) {
        return Value::String(unescape(&s[1..s.len() - 1]));
    }
    Value::String(s.to_string())
}

/// Reverses the two recognized escapes, `\\` and `\"`. Every other
/// backslash sequence stays literal.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// A serde `Deserializer` over an owned [`Value`], used by
/// [`from_value`](crate::from_value) and [`from_str`](crate::from_str).
pub(crate) struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub(crate) fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(obj) => {
                let mut iter = obj.into_iter();
                let Some((variant, value)) = iter.next() else {
                    return Err(Error::custom("expected enum variant"));
                };
                if iter.next().is_some() {
                    return Err(Error::custom("expected single-entry enum object"));
                }
                visitor.visit_enum(EnumDeserializer::new(variant, value))
            }
            _ => Err(Error::custom("expected enum")),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer {
            variant,
            value: Some(value),
        }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            _ => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    fn decode(input: &str) -> Value {
        decode_str(input, &Options::default())
    }

    #[test]
    fn test_header_field_list() {
        assert_eq!(header_field_list("[2]{id,name}:"), Some("id,name"));
        assert_eq!(header_field_list("{id,name}:"), Some("id,name"));
        assert_eq!(header_field_list("[10]{a}:"), Some("a"));
        assert_eq!(header_field_list("{}:"), None);
        assert_eq!(header_field_list("[]{a}:"), None);
        assert_eq!(header_field_list("[x]{a}:"), None);
        assert_eq!(header_field_list("[2]{a}"), None);
        assert_eq!(header_field_list("[2]{a}: x"), None);
        assert_eq!(header_field_list("{a}b}:"), None);
    }

    #[test]
    fn test_split_at_unquoted_colon() {
        assert_eq!(split_at_unquoted_colon("key: value"), ("key", Some(" value")));
        assert_eq!(split_at_unquoted_colon("key:"), ("key", Some("")));
        assert_eq!(split_at_unquoted_colon("no separator"), ("no separator", None));
        assert_eq!(
            split_at_unquoted_colon("\"a:b\": 1"),
            ("\"a:b\"", Some(" 1"))
        );
        assert_eq!(
            split_at_unquoted_colon("\"a\\\":b\": 1"),
            ("\"a\\\":b\"", Some(" 1"))
        );
    }

    #[test]
    fn test_split_row() {
        assert_eq!(split_row("1,Alice,admin", ','), vec!["1", "Alice", "admin"]);
        assert_eq!(split_row("1, Alice , admin", ','), vec!["1", "Alice", "admin"]);
        assert_eq!(split_row("\"a,b\",c", ','), vec!["\"a,b\"", "c"]);
        assert_eq!(split_row("a,b,", ','), vec!["a", "b"]);
        assert_eq!(split_row("a,,b", ','), vec!["a", "", "b"]);
        assert_eq!(split_row("1|2", '|'), vec!["1", "2"]);
    }

    #[test]
    fn test_parse_scalar() {
        assert_eq!(parse_scalar("null"), Value::Null);
        assert_eq!(parse_scalar("true"), Value::Bool(true));
        assert_eq!(parse_scalar("false"), Value::Bool(false));
        assert_eq!(parse_scalar("42"), Value::Number(Number::Integer(42)));
        assert_eq!(parse_scalar("-42"), Value::Number(Number::Integer(-42)));
        assert_eq!(parse_scalar("3.5"), Value::Number(Number::Float(3.5)));
        assert_eq!(parse_scalar("\"42\""), Value::String("42".to_string()));
        assert_eq!(
            parse_scalar("\"a \\\"b\\\"\""),
            Value::String("a \"b\"".to_string())
        );
        assert_eq!(parse_scalar("hello"), Value::String("hello".to_string()));
        // Unrecognized escapes stay literal.
        assert_eq!(parse_scalar("\"a\\nb\""), Value::String("a\\nb".to_string()));
    }

    #[test]
    fn test_decode_single_line_object() {
        assert_eq!(decode("key: value"), toon!({ "key": "value" }));
        assert_eq!(decode("key:"), toon!({ "key": null }));
    }

    #[test]
    fn test_decode_single_line_array() {
        assert_eq!(decode("red,green,blue"), toon!(["red", "green", "blue"]));
        assert_eq!(decode("1,2,3"), toon!([1, 2, 3]));
    }

    #[test]
    fn test_decode_nested_object() {
        let value = decode("user:\n  name: Alice\n  age: 30\nactive: true");
        assert_eq!(
            value,
            toon!({ "user": { "name": "Alice", "age": 30 }, "active": true })
        );
    }

    #[test]
    fn test_decode_tabular() {
        let value = decode("[2]{id,name}:\n  1,Alice\n  2,Bob");
        assert_eq!(
            value,
            toon!([{ "id": 1, "name": "Alice" }, { "id": 2, "name": "Bob" }])
        );
        // Headers without the count prefix parse the same.
        let value = decode("{id,name}:\n  1,Alice");
        assert_eq!(value, toon!([{ "id": 1, "name": "Alice" }]));
    }

    #[test]
    fn test_decode_tabular_under_key_same_indent() {
        let value = decode("users:\n[1]{id}:\n  7");
        assert_eq!(value, toon!({ "users": [{ "id": 7 }] }));
    }

    #[test]
    fn test_decode_list() {
        let value = decode("- string\n- 42\n-\n  a: 1");
        assert_eq!(value, toon!(["string", 42, { "a": 1 }]));
    }

    #[test]
    fn test_decode_duplicate_keys_overwrite() {
        assert_eq!(decode("a: 1\na: 2"), toon!({ "a": 2 }));
    }

    #[test]
    fn test_decode_bad_count_prefix_reads_as_object() {
        // "[x]" is not a valid count, so the line is not a header at all; it
        // reads as a nested object with one odd key.
        let value = decode("users:\n  [x]{id}:\n    1");
        let users = value.as_object().unwrap().get("users").unwrap();
        assert_eq!(users, &toon!({ "[x]{id}": 1 }));
    }
}
