/// Builds a [`Value`](crate::Value) from a literal.
///
/// Object and array literals nest the way JSON does. The bracketed
/// `{fields}: (row), (row)` form mirrors the tabular wire shape: it
/// expands to the array of records the encoder writes as a header line
/// plus one delimited row per record. Rows pair with the field list
/// positionally, so a short row leaves the trailing fields unbound and a
/// long row drops its surplus cells, the same pairing decoded tabular
/// rows get.
///
/// ```rust
/// use toon_codec::{encode_value, toon, Options};
///
/// let users = toon!([{ "id", "name" }: (1, "Alice"), (2, "Bob")]);
/// assert_eq!(
///     encode_value(&users, &Options::default()),
///     "[2]{id,name}:\n  1,Alice\n  2,Bob"
/// );
///
/// let doc = toon!({
///     "active": true,
///     "tags": ["a", "b"],
///     "owner": { "name": "Ada" }
/// });
/// assert!(doc.is_object());
/// ```
#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::Value::Null
    };
    (true) => {
        $crate::Value::Bool(true)
    };
    (false) => {
        $crate::Value::Bool(false)
    };
    // Records under one field list, shaped like a tabular block: a header
    // of field names, then one parenthesized tuple per row.
    ([ { $($field:literal),+ $(,)? }: $( ( $($row:tt)+ ) ),+ $(,)? ]) => {{
        let fields = [ $($field),+ ];
        $crate::Value::Array(::std::vec![
            $({
                let mut cells = ::std::vec::Vec::new();
                $crate::toon!(@values cells $($row)+);
                $crate::Value::Object(
                    fields
                        .iter()
                        .zip(cells)
                        .map(|(field, cell)| (field.to_string(), cell))
                        .collect(),
                )
            }),+
        ])
    }};
    ([]) => {
        $crate::Value::Array(::std::vec::Vec::new())
    };
    ([ $($elem:tt)+ ]) => {{
        let mut elems = ::std::vec::Vec::new();
        $crate::toon!(@values elems $($elem)+);
        $crate::Value::Array(elems)
    }};
    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };
    ({ $($entry:tt)+ }) => {{
        let mut object = $crate::Map::new();
        $crate::toon!(@entries object $($entry)+);
        $crate::Value::Object(object)
    }};
    // Internal: a comma-separated value list. A single token tree recurses
    // (containers, keywords, plain scalars); a longer run of tokens, such
    // as `-2.5` or `1 + 1`, is taken as one expression.
    (@values $out:ident) => {};
    (@values $out:ident $value:tt) => {
        $out.push($crate::toon!($value));
    };
    (@values $out:ident $value:tt , $($rest:tt)*) => {
        $out.push($crate::toon!($value));
        $crate::toon!(@values $out $($rest)*);
    };
    (@values $out:ident $value:expr) => {
        $out.push($crate::toon!($value));
    };
    (@values $out:ident $value:expr , $($rest:tt)*) => {
        $out.push($crate::toon!($value));
        $crate::toon!(@values $out $($rest)*);
    };
    // Internal: `"key": value` entries, with the same value handling.
    (@entries $map:ident) => {};
    (@entries $map:ident $key:literal : $value:tt) => {
        $map.insert($key.to_string(), $crate::toon!($value));
    };
    (@entries $map:ident $key:literal : $value:tt , $($rest:tt)*) => {
        $map.insert($key.to_string(), $crate::toon!($value));
        $crate::toon!(@entries $map $($rest)*);
    };
    (@entries $map:ident $key:literal : $value:expr) => {
        $map.insert($key.to_string(), $crate::toon!($value));
    };
    (@entries $map:ident $key:literal : $value:expr , $($rest:tt)*) => {
        $map.insert($key.to_string(), $crate::toon!($value));
        $crate::toon!(@entries $map $($rest)*);
    };
    ($scalar:expr) => {
        $crate::to_value(&$scalar).unwrap_or($crate::Value::Null)
    };
}
