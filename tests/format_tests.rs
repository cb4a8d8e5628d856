//! Wire-format tests: exact encoded output for each shape, and the
//! encode/decode guarantees callers rely on.

use toon_codec::{decode, encode_value, toon, Delimiter, Options, Value};

fn encode(value: &Value) -> String {
    encode_value(value, &Options::default())
}

#[test]
fn test_flat_object() {
    let value = toon!({ "name": "Alice", "age": 30 });
    assert_eq!(encode(&value), "name: Alice\nage: 30");
}

#[test]
fn test_tabular_array() {
    let value = toon!([
        { "id": 1, "name": "Alice", "role": "admin" },
        { "id": 2, "name": "Bob", "role": "user" }
    ]);
    assert_eq!(
        encode(&value),
        "[2]{id,name,role}:\n  1,Alice,admin\n  2,Bob,user"
    );
}

#[test]
fn test_inline_primitive_array() {
    let value = toon!({ "colors": ["red", "green", "blue"] });
    assert_eq!(encode(&value), "colors: red,green,blue");
}

#[test]
fn test_boolean_like_string_is_quoted() {
    let value = toon!({ "key": "true" });
    assert_eq!(encode(&value), "key: \"true\"");
}

#[test]
fn test_mixed_array_list() {
    let value = toon!(["string", 42, { "key": "value" }]);
    assert_eq!(encode(&value), "- string\n- 42\n- key: value");
}

#[test]
fn test_tabular_with_partial_rows() {
    // Four of the first row's five keys is exactly the 80 % threshold; the
    // missing column shows up as null.
    let value = toon!([
        { "a": 1, "b": 2, "c": 3, "d": 4, "e": 5 },
        { "a": 6, "b": 7, "c": 8, "d": 9 }
    ]);
    assert_eq!(encode(&value), "[2]{a,b,c,d,e}:\n  1,2,3,4,5\n  6,7,8,9,null");
}

#[test]
fn test_below_overlap_threshold_falls_back_to_list() {
    let value = toon!([
        { "a": 1, "b": 2, "c": 3, "d": 4, "e": 5 },
        { "a": 6, "b": 7, "c": 8 }
    ]);
    let text = encode(&value);
    assert!(text.starts_with("-\n"));
    assert!(!text.contains("}:"));
}

#[test]
fn test_identical_key_sets_always_tabular() {
    let value = toon!([{ "x": 1 }, { "x": 2 }, { "x": 3 }]);
    assert_eq!(encode(&value), "[3]{x}:\n  1\n  2\n  3");
}

#[test]
fn test_header_key_union_in_first_seen_order() {
    let value = toon!([
        { "b": 1, "a": 2, "c": 3, "d": 4, "e": 5 },
        { "b": 6, "a": 7, "c": 8, "d": 9, "f": 10 }
    ]);
    assert_eq!(
        encode(&value),
        "[2]{b,a,c,d,e,f}:\n  1,2,3,4,5,null\n  6,7,8,9,null,10"
    );
}

#[test]
fn test_length_marker_toggle() {
    let value = toon!([{ "a": 1 }, { "a": 2 }]);

    let with_marker = encode_value(&value, &Options::new().with_length_marker(true));
    assert_eq!(with_marker, "[2]{a}:\n  1\n  2");

    let without = encode_value(&value, &Options::new().with_length_marker(false));
    assert_eq!(without, "{a}:\n  1\n  2");
    assert!(!without.contains("]{"));

    // Both forms decode identically.
    assert_eq!(decode(&with_marker, &Options::default()), value);
    assert_eq!(decode(&without, &Options::default()), value);
}

#[test]
fn test_decode_extra_row_values_dropped() {
    let value = decode("[2]{id,name}:\n  1,Alice\n  2,Bob,admin", &Options::default());
    assert_eq!(
        value,
        toon!([{ "id": 1, "name": "Alice" }, { "id": 2, "name": "Bob" }])
    );
}

#[test]
fn test_decode_short_row_leaves_fields_unbound() {
    let value = decode("[2]{id,name}:\n  1,Alice\n  2", &Options::default());
    assert_eq!(value, toon!([{ "id": 1, "name": "Alice" }, { "id": 2 }]));
}

#[test]
fn test_decode_bare_key_is_null() {
    assert_eq!(decode("key:", &Options::default()), toon!({ "key": null }));
}

#[test]
fn test_empty_containers_at_root() {
    assert_eq!(encode(&toon!({})), "{}");
    assert_eq!(encode(&toon!([])), "[]");
}

#[test]
fn test_empty_containers_as_object_values() {
    let value = toon!({ "config": {}, "tags": [] });
    let text = encode(&value);
    assert_eq!(text, "config: {}\ntags: []");
    assert_eq!(decode(&text, &Options::default()), value);
}

#[test]
fn test_nested_object_indentation() {
    let value = toon!({
        "user": { "name": "Alice", "meta": { "verified": true } },
        "active": true
    });
    let text = encode(&value);
    assert_eq!(
        text,
        "user:\n  name: Alice\n  meta:\n    verified: true\nactive: true"
    );
    assert_eq!(decode(&text, &Options::default()), value);
}

#[test]
fn test_tabular_under_key() {
    let value = toon!({ "users": [{ "id": 1 }, { "id": 2 }], "total": 2 });
    let text = encode(&value);
    assert_eq!(text, "users:\n  [2]{id}:\n    1\n    2\ntotal: 2");
    assert_eq!(decode(&text, &Options::default()), value);
}

#[test]
fn test_quoting_minimality() {
    // Unquoted iff non-empty, no reserved characters or delimiter, no
    // leading/trailing space, and not boolean-, null-, or number-like.
    let unquoted = ["hello", "hello world", "café", "a-b", "x_y.z", "10px"];
    for s in unquoted {
        assert_eq!(encode(&Value::from(s)), s, "expected {s:?} to stay bare");
    }

    let quoted = [
        ("", "\"\""),
        (" lead", "\" lead\""),
        ("trail ", "\"trail \""),
        ("a,b", "\"a,b\""),
        ("a:b", "\"a:b\""),
        ("a#b", "\"a#b\""),
        ("[3]", "\"[3]\""),
        ("{k}", "\"{k}\""),
        ("true", "\"true\""),
        ("false", "\"false\""),
        ("null", "\"null\""),
        ("42", "\"42\""),
        ("-1.5", "\"-1.5\""),
    ];
    for (s, expected) in quoted {
        assert_eq!(encode(&Value::from(s)), expected);
    }
}

#[test]
fn test_quote_escapes_are_minimal() {
    // Only backslash and double quote are escaped inside quotes.
    let value = Value::from("say \"hi\", ok");
    let text = encode(&value);
    assert_eq!(text, "\"say \\\"hi\\\", ok\"");
    assert_eq!(decode(&text, &Options::default()), value);

    let value = Value::from("back\\slash, yes");
    let text = encode(&value);
    assert_eq!(text, "\"back\\\\slash, yes\"");
    assert_eq!(decode(&text, &Options::default()), value);
}

#[test]
fn test_delimiter_respect() {
    let value = toon!({
        "rows": [
            { "id": 1, "note": "a,b" },
            { "id": 2, "note": "c|d" }
        ],
        "tags": ["x", "y,z", "w"],
        "name": "Alice"
    });

    for delimiter in [
        Delimiter::Comma,
        Delimiter::Tab,
        Delimiter::Pipe,
        Delimiter::Custom(';'),
    ] {
        let options = Options::new().with_delimiter(delimiter);
        let text = encode_value(&value, &options);
        assert_eq!(
            decode(&text, &options),
            value,
            "round trip failed for {delimiter:?}"
        );
    }
}

#[test]
fn test_custom_indent_width() {
    let value = toon!({ "items": [1, { "a": 1, "b": 2 }], "n": 5 });
    let options = Options::new().with_indent(4);
    let text = encode_value(&value, &options);
    assert_eq!(
        text,
        "items:\n    - 1\n    -\n        a: 1\n        b: 2\nn: 5"
    );
    assert_eq!(decode(&text, &options), value);
}

#[test]
fn test_dashed_list_nested_blocks_round_trip() {
    let value = toon!([1, { "a": 1, "b": 2 }, [3, 4, 5]]);
    let text = encode(&value);
    assert_eq!(text, "- 1\n-\n  a: 1\n  b: 2\n- 3,4,5");
    // The inline element reads back as a scalar string; block elements
    // survive.
    let decoded = decode(&text, &Options::default());
    assert_eq!(decoded, toon!([1, { "a": 1, "b": 2 }, "3,4,5"]));
}

#[test]
fn test_dashed_list_empty_containers_decode_as_strings() {
    let value = toon!(["x", {}, []]);
    let text = encode(&value);
    assert_eq!(text, "- x\n- {}\n- []");
    assert_eq!(decode(&text, &Options::default()), toon!(["x", "{}", "[]"]));
}

#[test]
fn test_single_line_object_in_list_decodes_as_string() {
    let text = "- string\n- 42\n- key: value";
    assert_eq!(
        decode(text, &Options::default()),
        toon!(["string", 42, "key: value"])
    );
}

#[test]
fn test_quoted_keys() {
    let value = toon!({ "a:b": 1, "42": 2, "true": 3, "with space, comma": 4 });
    let text = encode(&value);
    assert_eq!(
        text,
        "\"a:b\": 1\n\"42\": 2\n\"true\": 3\n\"with space, comma\": 4"
    );
    assert_eq!(decode(&text, &Options::default()), value);
}

#[test]
fn test_number_forms() {
    let value = toon!({ "i": 3, "f": 3.0, "neg": -2.5 });
    let text = encode(&value);
    assert_eq!(text, "i: 3\nf: 3.0\nneg: -2.5");
    assert_eq!(decode(&text, &Options::default()), value);
}

#[test]
fn test_decode_is_total_on_odd_input() {
    let options = Options::default();
    // None of these may panic; each yields some value.
    let inputs = [
        "",
        "\n\n\n",
        "::::",
        "\"unbalanced",
        "[9]{a,b}:",
        "   deeply\n        indented\n  nonsense:",
        "- \n-\n- -",
    ];
    for input in inputs {
        let _ = decode(input, &options);
    }
}

#[test]
fn test_decode_stray_quote_toggles_to_line_end() {
    // The unbalanced quote swallows the colon, so the line has no key-value
    // separator and reads as a scalar.
    let value = decode("\"a: b", &Options::default());
    assert_eq!(value, Value::from("\"a: b"));
}

#[test]
fn test_decode_dedent_closes_container() {
    let text = "outer:\n  inner: 1\nnext: 2";
    assert_eq!(
        decode(text, &Options::default()),
        toon!({ "outer": { "inner": 1 }, "next": 2 })
    );
}

#[test]
fn test_round_trip_document() {
    let value = toon!({
        "title": "inventory",
        "items": [
            { "sku": "A-1", "qty": 2, "price": 9.99 },
            { "sku": "B-2", "qty": 1, "price": 14.5 }
        ],
        "tags": ["warehouse", "q3"],
        "owner": { "name": "Kim", "contact": { "email": "kim@example.com" } },
        "archived": false,
        "note": null
    });
    let text = encode(&value);
    assert_eq!(decode(&text, &Options::default()), value);
}
