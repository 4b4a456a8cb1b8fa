mod assets;
use assets::*;
use json_nbt::{
    convert,
    encode,
    encode_slice,
    encode_with,
    io::StringFlavor,
    NbtTag,
    NestedLists,
    PathSegment,
    TagKind,
    TranscodeError,
    TranscodeOptions,
};
use serde_json::{json, Value};

const BYTE: u8 = 0x01;
const SHORT: u8 = 0x02;
const INT: u8 = 0x03;
const LONG: u8 = 0x04;
const FLOAT: u8 = 0x05;
const DOUBLE: u8 = 0x06;
const STRING: u8 = 0x08;
const LIST: u8 = 0x09;
const COMPOUND: u8 = 0x0A;

fn nested(depth: usize) -> Value {
    let mut value = json!(1);
    for _ in 0 .. depth {
        value = json!({ "n": value });
    }
    value
}

fn tag(value: Value) -> NbtTag {
    convert::to_tag(&value, &TranscodeOptions::default()).unwrap()
}

fn error_path(error: &TranscodeError) -> String {
    error.path().unwrap().to_string()
}

#[test]
fn empty_document() {
    assert_eq!(encode(&json!({}), None).unwrap(), [0x0A, 0x00, 0x00, 0x00]);
}

#[test]
fn root_name() {
    assert_eq!(
        encode(&json!({}), Some("hi")).unwrap(),
        [0x0A, 0x00, 0x02, b'h', b'i', 0x00]
    );
    assert_eq!(
        encode(&json!({"a": 1}), Some("")).unwrap(),
        encode(&json!({"a": 1}), None).unwrap()
    );
}

#[test]
fn nested_compound() {
    let bytes = encode(&json!({"a": {"b": "5b"}}), None).unwrap();
    let expected = document(&[&concat(&[
        &header(COMPOUND, "a"),
        &header(BYTE, "b"),
        &[0x05],
        &[0x00],
    ])]);

    assert_eq!(bytes, expected);
}

#[test]
fn suffix_kinds() {
    let bytes = encode(
        &json!({
            "b": "-1b",
            "s": "-2s",
            "l": "7l",
            "f": "1.5f",
            "d": "0.5d"
        }),
        None,
    )
    .unwrap();

    let expected = document(&[
        &concat(&[&header(BYTE, "b"), &[0xFF]]),
        &concat(&[&header(SHORT, "s"), &[0xFF, 0xFE]]),
        &concat(&[&header(LONG, "l"), &[0, 0, 0, 0, 0, 0, 0, 7]]),
        &concat(&[&header(FLOAT, "f"), &[0x3F, 0xC0, 0x00, 0x00]]),
        &concat(&[&header(DOUBLE, "d"), &[0x3F, 0xE0, 0, 0, 0, 0, 0, 0]]),
    ]);

    assert_eq!(bytes, expected);
}

#[test]
fn suffix_edge_literals() {
    assert_eq!(tag(json!("+3s")), NbtTag::Short(3));
    assert_eq!(tag(json!("5.d")), NbtTag::Double(5.0));
    assert_eq!(tag(json!(".25f")), NbtTag::Float(0.25));
    assert_eq!(tag(json!("127b")), NbtTag::Byte(127));
    assert_eq!(tag(json!("-128b")), NbtTag::Byte(-128));
    assert_eq!(
        tag(json!("9223372036854775807l")),
        NbtTag::Long(i64::MAX)
    );
}

#[test]
fn suffix_fallthrough() {
    for string in ["b", "-d", "1_000l", "1.2.3f", " 5b", "5bb", "5B", "0x1Fs", "1e5d", "text"] {
        assert_eq!(tag(json!(string)), NbtTag::from(string), "{}", string);
    }
}

#[test]
fn booleans_and_null() {
    let bytes = encode(&json!({"t": true, "f": false, "n": null}), None).unwrap();
    let expected = document(&[
        &concat(&[&header(BYTE, "t"), &[0x01]]),
        &concat(&[&header(BYTE, "f"), &[0x00]]),
        &concat(&[&header(INT, "n"), &[0, 0, 0, 0]]),
    ]);

    assert_eq!(bytes, expected);
}

#[test]
fn utf8_length_prefix() {
    let bytes = encode(&json!({"s": "\u{E9}\u{65E5}"}), None).unwrap();
    let expected = document(&[&concat(&[
        &header(STRING, "s"),
        &[0x00, 0x05],
        "\u{E9}\u{65E5}".as_bytes(),
    ])]);

    assert_eq!(bytes, expected);
}

#[test]
fn int_list() {
    let bytes = encode(&json!({"a": [1, 2, 3]}), None).unwrap();
    let expected = document(&[&concat(&[
        &header(LIST, "a"),
        &[INT, 0, 0, 0, 3],
        &[0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3],
    ])]);

    assert_eq!(bytes, expected);
}

#[test]
fn empty_list() {
    let bytes = encode(&json!({"a": []}), None).unwrap();
    let expected = document(&[&concat(&[&header(LIST, "a"), &[0x00, 0, 0, 0, 0]])]);

    assert_eq!(bytes, expected);
}

#[test]
fn null_led_list() {
    let list = match tag(json!([null, "x", true])) {
        NbtTag::List(list) => list,
        other => panic!("expected a list, found {}", other),
    };

    assert_eq!(list.element_kind(), TagKind::Int);
    assert!(list.iter().all(|tag| *tag == NbtTag::Int(0)));
    assert_eq!(list.len(), 3);
    assert_eq!(list.get(2), Some(&NbtTag::Int(0)));
}

#[test]
fn compound_list() {
    let bytes = encode(&json!({"a": [{"x": "1b"}, {}]}), None).unwrap();
    let expected = document(&[&concat(&[
        &header(LIST, "a"),
        &[COMPOUND, 0, 0, 0, 2],
        &header(BYTE, "x"),
        &[0x01, 0x00],
        &[0x00],
    ])]);

    assert_eq!(bytes, expected);
}

#[test]
fn list_of_lists() {
    let bytes = encode(&json!({"a": [[1], []]}), None).unwrap();
    let expected = document(&[&concat(&[
        &header(LIST, "a"),
        &[LIST, 0, 0, 0, 2],
        &[INT, 0, 0, 0, 1, 0, 0, 0, 1],
        &[0x00, 0, 0, 0, 0],
    ])]);

    assert_eq!(bytes, expected);
}

#[test]
fn forbidden_nested_lists() {
    let options = TranscodeOptions::default().nested_lists(NestedLists::Forbid);

    let error = encode_with(&json!({"m": [[1], [2]]}), None, &options).unwrap_err();
    assert!(matches!(error, TranscodeError::UnsupportedStructure { .. }));
    assert_eq!(error_path(&error), "m[0]");
    assert_eq!(
        error.path().unwrap().segments(),
        [PathSegment::Key("m".into()), PathSegment::Index(0)]
    );

    // Lists of compounds holding lists are still fine
    assert!(encode_with(&json!({"m": [{"l": [1]}]}), None, &options).is_ok());
}

#[test]
fn list_heterogeneity() {
    let error = encode(&json!({"a": [1, 2, "x"]}), None).unwrap_err();
    match &error {
        TranscodeError::ListHeterogeneity {
            index,
            expected,
            found,
            ..
        } => {
            assert_eq!(*index, 2);
            assert_eq!(*expected, TagKind::Int);
            assert_eq!(*found, TagKind::String);
        }
        other => panic!("unexpected error {}", other),
    }
    assert_eq!(error_path(&error), "a");

    let error = encode(&json!({"outer": {"inner": ["1b", 2]}}), None).unwrap_err();
    assert!(matches!(
        error,
        TranscodeError::ListHeterogeneity {
            index: 1,
            expected: TagKind::Byte,
            found: TagKind::Int,
            ..
        }
    ));
    assert_eq!(error_path(&error), "outer.inner");
    assert_eq!(
        error.to_string(),
        "2 is not type byte in list outer.inner (element 1 is Int)"
    );

    // Bytes from booleans and bytes from suffixes share a kind
    assert!(encode(&json!({"a": [true, "3b"]}), None).is_ok());
    // A null after the first element infers to an Int like any other
    assert!(encode(&json!({"a": [1, null]}), None).is_ok());
    assert!(encode(&json!({"a": ["x", null]}), None).is_err());
}

#[test]
fn heterogeneity_before_range() {
    let error = encode(&json!({"a": [1, "300b"]}), None).unwrap_err();
    assert!(matches!(
        error,
        TranscodeError::ListHeterogeneity {
            index: 1,
            expected: TagKind::Int,
            found: TagKind::Byte,
            ..
        }
    ));

    let error = encode(&json!({"a": [1, {"b": "300b"}]}), None).unwrap_err();
    assert!(matches!(
        error,
        TranscodeError::ListHeterogeneity {
            found: TagKind::Compound,
            ..
        }
    ));

    // Elements of the right kind still have their literals checked
    let error = encode(&json!({"a": ["1b", "300b"]}), None).unwrap_err();
    assert!(matches!(error, TranscodeError::NumericRange { .. }));
    assert_eq!(error_path(&error), "a[1]");
}

#[test]
fn quoted_path_keys() {
    let error = encode(&json!({"a.b": [1, "x"]}), None).unwrap_err();
    assert_eq!(error_path(&error), "\"a.b\"");

    let error = encode(&json!({"a": {"b": [1, "x"]}}), None).unwrap_err();
    assert_eq!(error_path(&error), "a.b");

    let error = encode(&json!({"x[0]": {"": {"k": ["1b", 2]}}}), None).unwrap_err();
    assert_eq!(error_path(&error), "\"x[0]\".\"\".k");
}

#[test]
fn suffix_out_of_range() {
    for (literal, target) in [
        ("128b", TagKind::Byte),
        ("-129b", TagKind::Byte),
        ("1.5b", TagKind::Byte),
        ("40000s", TagKind::Short),
        ("9223372036854775808l", TagKind::Long),
        ("0.5l", TagKind::Long),
    ] {
        match encode(&json!({ "v": literal }), None) {
            Err(TranscodeError::NumericRange {
                value,
                target: actual,
                path,
            }) => {
                assert_eq!(&*value, literal);
                assert_eq!(actual, target);
                assert_eq!(path.to_string(), "v");
            }
            other => panic!("{} produced {:?}", literal, other.map(|_| ())),
        }
    }
}

#[test]
fn float_overflow() {
    let huge = format!("1{}", "0".repeat(40));

    assert!(matches!(
        encode(&json!({ "v": format!("{}f", huge) }), None),
        Err(TranscodeError::NumericRange {
            target: TagKind::Float,
            ..
        })
    ));
    assert_eq!(tag(json!(format!("{}d", huge))), NbtTag::Double(1e40));

    let huger = format!("1{}d", "0".repeat(400));
    assert!(matches!(
        encode(&json!({ "v": huger }), None),
        Err(TranscodeError::NumericRange {
            target: TagKind::Double,
            ..
        })
    ));
}

#[test]
fn raw_number_bounds() {
    assert_eq!(tag(json!(2147483647)), NbtTag::Int(i32::MAX));
    assert_eq!(tag(json!(-2147483648i64)), NbtTag::Int(i32::MIN));
    assert_eq!(tag(json!(3.0)), NbtTag::Int(3));

    for value in [json!(2147483648i64), json!(-2147483649i64), json!(1.5), json!(u64::MAX)] {
        let error = encode(&json!({ "n": value.clone() }), None).unwrap_err();
        assert!(
            matches!(error, TranscodeError::NumericRange {
                target: TagKind::Int,
                ..
            }),
            "{}",
            value
        );
        assert_eq!(error_path(&error), "n");
    }
}

#[test]
fn key_order() {
    let bytes = encode(&json!({"zebra": 1, "apple": 2, "mango": 3}), None).unwrap();
    let expected = document(&[
        &concat(&[&header(INT, "zebra"), &[0, 0, 0, 1]]),
        &concat(&[&header(INT, "apple"), &[0, 0, 0, 2]]),
        &concat(&[&header(INT, "mango"), &[0, 0, 0, 3]]),
    ]);

    assert_eq!(bytes, expected);
}

#[test]
fn depth_limit() {
    // The root compound and nine nested objects
    let document = nested(10);

    let options = TranscodeOptions::default().max_depth(Some(10));
    assert!(encode_with(&document, None, &options).is_ok());

    let options = TranscodeOptions::default().max_depth(Some(9));
    let error = encode_with(&document, None, &options).unwrap_err();
    assert!(matches!(error, TranscodeError::DepthLimitExceeded { limit: 9, .. }));
    assert_eq!(error_path(&error), "n.n.n.n.n.n.n.n.n");

    // Lists count towards the depth as well
    let options = TranscodeOptions::default().max_depth(Some(2));
    assert!(encode_with(&json!({"a": [1]}), None, &options).is_ok());
    assert!(encode_with(&json!({"a": [[1]]}), None, &options).is_err());

    assert!(encode(&nested(600), None).is_err());
    let options = TranscodeOptions::default().max_depth(None);
    assert!(encode_with(&nested(600), None, &options).is_ok());
}

#[test]
fn non_object_root() {
    for document in [json!([1, 2]), json!("text"), json!(1), json!(null)] {
        let error = encode(&document, None).unwrap_err();
        assert!(matches!(error, TranscodeError::UnsupportedStructure { .. }));
        assert!(error.path().unwrap().is_root());
    }
}

#[test]
fn string_too_long() {
    let long = "a".repeat(70_000);

    let error = encode(&json!({ "s": long.clone() }), None).unwrap_err();
    assert!(matches!(error, TranscodeError::StringTooLong {
        length: 70_000,
        ..
    }));
    assert_eq!(error_path(&error), "s");

    let mut map = serde_json::Map::new();
    map.insert(long, json!(1));
    let error = encode(&Value::Object(map), None).unwrap_err();
    assert!(matches!(error, TranscodeError::StringTooLong { .. }));

    let exact = "a".repeat(usize::from(u16::MAX));
    assert!(encode(&json!({ "s": exact }), None).is_ok());
}

#[test]
fn java_strings() {
    let options = TranscodeOptions::default().string_flavor(StringFlavor::JavaCesu8);
    let bytes = encode_with(&json!({"s": "a\u{0}"}), None, &options).unwrap();
    let expected = document(&[&concat(&[
        &header(STRING, "s"),
        &[0x00, 0x03, b'a', 0xC0, 0x80],
    ])]);

    assert_eq!(bytes, expected);
}

#[test]
fn text_input() {
    let text = b"{\r\n  \"a\": [1, 2],\r\n  \"b\": \"2s\"\r\n}\r\n";
    assert_eq!(
        encode_slice(text, None, &TranscodeOptions::default()).unwrap(),
        encode(&json!({"a": [1, 2], "b": "2s"}), None).unwrap()
    );

    let error = encode_slice(b"{\"a\": [1, 2}", None, &TranscodeOptions::default()).unwrap_err();
    assert!(matches!(error, TranscodeError::Parse(_)));
    assert!(error.path().is_none());
}

#[test]
fn text_depth() {
    let text = |depth: usize| format!("{}1{}", "{\"n\":".repeat(depth), "}".repeat(depth));

    assert_eq!(
        encode_slice(text(200).as_bytes(), None, &TranscodeOptions::default()).unwrap(),
        encode(&nested(200), None).unwrap()
    );

    let error =
        encode_slice(text(600).as_bytes(), None, &TranscodeOptions::default()).unwrap_err();
    assert!(matches!(error, TranscodeError::DepthLimitExceeded { limit: 512, .. }));

    let options = TranscodeOptions::default().max_depth(None);
    assert!(encode_slice(text(200).as_bytes(), None, &options).is_ok());

    // Brackets inside strings do not count towards the depth
    let options = TranscodeOptions::default().max_depth(Some(1));
    let text = br#"{"s": "[[{{\"[[", "t": "]]"}"#;
    assert!(encode_slice(text, None, &options).is_ok());
    assert!(encode_slice(br#"{"s": [1]}"#, None, &options).is_err());
}

#[test]
fn error_value_rendering() {
    let long = "x".repeat(100);
    let error = encode(&json!({ "a": ["1b", long] }), None).unwrap_err();

    match error {
        TranscodeError::ListHeterogeneity { value, .. } => {
            assert!(value.ends_with("..."));
            assert_eq!(value.chars().count(), 35);
        }
        other => panic!("unexpected error {}", other),
    }
}
