//! TOON encoding.
//!
//! The encoder walks a [`Value`] tree and emits TOON text, choosing a shape
//! for each container:
//!
//! - **Tabular blocks** for uniform arrays of objects (one header line, one
//!   delimited row per element)
//! - **Inline rows** for arrays of primitives (scalars joined by the
//!   delimiter, no brackets)
//! - **Dashed lists** for everything else (`- ` per element)
//! - **Key lines** for objects, one entry per line in insertion order
//!
//! Strings are left unquoted whenever that is unambiguous; quoting kicks in
//! for reserved characters, the active delimiter, leading/trailing spaces,
//! and strings that read as `true`/`false`/`null` or as numbers.
//!
//! ## Usage
//!
//! Most users should use [`encode_value`](crate::encode_value) or the typed
//! [`to_string`](crate::to_string) in the crate root:
//!
//! ```rust
//! use toon_codec::{encode_value, toon, Options};
//!
//! let users = toon!([
//!     { "id": 1, "name": "Alice", "role": "admin" },
//!     { "id": 2, "name": "Bob", "role": "user" }
//! ]);
//! let text = encode_value(&users, &Options::default());
//! assert_eq!(text, "[2]{id,name,role}:\n  1,Alice,admin\n  2,Bob,user");
//! ```

use crate::{Error, Map, Number, Options, Result, Value};
use serde::{ser, Serialize};

/// Characters that always force quoting, regardless of the configured
/// delimiter.
const RESERVED: &[char] = &[',', ':', '[', ']', '{', '}', '#', '\n', '\r', '\t'];

/// Encodes a complete value tree. Total: never fails.
pub(crate) fn encode_value(value: &Value, options: &Options) -> String {
    let mut out = String::with_capacity(256);
    match value {
        Value::Object(obj) if obj.is_empty() => out.push_str("{}"),
        Value::Object(obj) => write_object(&mut out, obj, 0, options),
        Value::Array(arr) if arr.is_empty() => out.push_str("[]"),
        Value::Array(arr) => write_array(&mut out, arr, 0, options),
        scalar => write_scalar(&mut out, scalar, options),
    }
    out
}

fn push_indent(out: &mut String, depth: usize, options: &Options) {
    for _ in 0..depth * options.indent {
        out.push(' ');
    }
}

fn write_object(out: &mut String, obj: &Map, depth: usize, options: &Options) {
    for (i, (key, value)) in obj.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        push_indent(out, depth, options);
        write_string(out, key, options);
        out.push(':');
        match value {
            Value::Object(map) if map.is_empty() => out.push_str(" {}"),
            Value::Object(map) => {
                out.push('\n');
                write_object(out, map, depth + 1, options);
            }
            Value::Array(arr) if arr.is_empty() => out.push_str(" []"),
            Value::Array(arr) => {
                if let Some(fields) = tabular_fields(arr) {
                    out.push('\n');
                    write_tabular(out, arr, &fields, depth + 1, options);
                } else if arr.iter().all(is_primitive) {
                    out.push(' ');
                    write_inline(out, arr, options);
                } else {
                    out.push('\n');
                    write_list(out, arr, depth + 1, options);
                }
            }
            scalar => {
                out.push(' ');
                write_scalar(out, scalar, options);
            }
        }
    }
}

fn write_array(out: &mut String, arr: &[Value], depth: usize, options: &Options) {
    if let Some(fields) = tabular_fields(arr) {
        write_tabular(out, arr, &fields, depth, options);
    } else if arr.iter().all(is_primitive) {
        write_inline(out, arr, options);
    } else {
        write_list(out, arr, depth, options);
    }
}

/// Decides whether an array qualifies for the tabular shape and, if so,
/// returns the header fields: the union of row keys in first-seen order.
///
/// Qualifying means: non-empty, every element an object, and every
/// element's key-set overlapping the first element's keys in at least
/// `⌈0.8·|K|⌉` entries.
pub(crate) fn tabular_fields(elements: &[Value]) -> Option<Vec<String>> {
    let first = match elements.first() {
        Some(Value::Object(obj)) => obj,
        _ => return None,
    };
    // ⌈0.8·|K|⌉ in integer arithmetic
    let required = (4 * first.len() + 4) / 5;
    let mut fields: Vec<String> = Vec::new();
    for element in elements {
        let Value::Object(obj) = element else {
            return None;
        };
        let overlap = obj.keys().filter(|k| first.contains_key(k)).count();
        if overlap < required {
            return None;
        }
        for key in obj.keys() {
            if !fields.iter().any(|f| f == key) {
                fields.push(key.clone());
            }
        }
    }
    Some(fields)
}

#[inline]
pub(crate) fn is_primitive(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

fn write_tabular(
    out: &mut String,
    rows: &[Value],
    fields: &[String],
    depth: usize,
    options: &Options,
) {
    let delimiter = options.delimiter.as_char();
    push_indent(out, depth, options);
    if options.length_marker {
        out.push('[');
        out.push_str(&rows.len().to_string());
        out.push(']');
    }
    out.push('{');
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        write_string(out, field, options);
    }
    out.push_str("}:");

    for row in rows {
        let Value::Object(obj) = row else {
            continue;
        };
        out.push('\n');
        push_indent(out, depth + 1, options);
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(delimiter);
            }
            match obj.get(field) {
                Some(value) => write_scalar(out, value, options),
                None => out.push_str("null"),
            }
        }
    }
}

fn write_inline(out: &mut String, items: &[Value], options: &Options) {
    let delimiter = options.delimiter.as_char();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        write_scalar(out, item, options);
    }
}

fn write_list(out: &mut String, items: &[Value], depth: usize, options: &Options) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        push_indent(out, depth, options);
        out.push('-');
        match item {
            Value::Object(_) | Value::Array(_) => {
                let child = encode_value(item, options);
                if child.contains('\n') {
                    // Block element: bare dash, then the child re-indented so
                    // its first column sits one level deeper than the dash.
                    for line in child.split('\n') {
                        out.push('\n');
                        push_indent(out, depth + 1, options);
                        out.push_str(line);
                    }
                } else {
                    out.push(' ');
                    out.push_str(&child);
                }
            }
            scalar => {
                out.push(' ');
                write_scalar(out, scalar, options);
            }
        }
    }
}

fn write_scalar(out: &mut String, value: &Value, options: &Options) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s, options),
        // A container in scalar position (a tabular row cell) falls back to
        // its plain textual form.
        other => {
            let coerced = other.to_string();
            write_string(out, &coerced, options);
        }
    }
}

/// True when a string cannot appear bare: it starts or ends with a space, or
/// contains a reserved character or the active delimiter.
pub(crate) fn needs_quotes(s: &str, delimiter: char) -> bool {
    s.starts_with(' ')
        || s.ends_with(' ')
        || s.contains(|c: char| c == delimiter || RESERVED.contains(&c))
}

fn write_string(out: &mut String, s: &str, options: &Options) {
    let delimiter = options.delimiter.as_char();
    if s.is_empty() {
        out.push_str("\"\"");
    } else if needs_quotes(s, delimiter)
        || crate::value::looks_numeric(s)
        || matches!(s, "true" | "false" | "null")
    {
        out.push('"');
        for ch in s.chars() {
            match ch {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                other => out.push(other),
            }
        }
        out.push('"');
    } else {
        out.push_str(s);
    }
}

/// A serde `Serializer` that builds a [`Value`] tree instead of text.
///
/// This is what [`to_value`](crate::to_value) uses to turn arbitrary host
/// values into the six-variant tree the encoder operates on.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Map,
    current_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        if v <= i64::MAX as u64 {
            Ok(Value::Number(Number::Integer(v as i64)))
        } else {
            Ok(Value::Number(Number::Float(v as f64)))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::Float(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v
            .iter()
            .map(|&b| Value::Number(Number::Integer(b as i64)))
            .collect();
        Ok(Value::Array(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::new();
        map.insert(variant.to_string(), value.serialize(ValueSerializer)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple(self, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeVec {
    fn new() -> Self {
        SerializeVec { vec: Vec::new() }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: Map::new(),
            current_key: None,
        }
    }
}

fn to_value_inner<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value_inner(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}
