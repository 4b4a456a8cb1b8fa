#![deny(rust_2018_idioms)]
#![warn(missing_debug_implementations, missing_docs)]

/*!
Provides support for transcoding JSON documents into Minecraft's binary NBT format. Since JSON
cannot distinguish between NBT's many numeric widths, this crate also supports a small suffix
notation through which a JSON string can denote an explicitly typed scalar.

# Basic Usage

A JSON object becomes the root compound of the output. Every value inside it is mapped onto a
tag by a fixed set of inference rules (see [`convert`]), and the resulting tag tree is written
in the uncompressed binary format.

```
# use json_nbt::*;
use serde_json::json;

let document = json!({
    "name": "Steve",
    "level": 12,
    "alive": true
});

let bytes = encode(&document, Some("Player")).unwrap();

// Compound tag, then the root name "Player"
assert_eq!(&bytes[.. 3], &[0x0A, 0x00, 0x06]);
assert_eq!(&bytes[3 .. 9], b"Player");
// The root compound's End tag closes the document
assert_eq!(bytes.last(), Some(&0x00));
```

An empty object produces the smallest possible document.
```
# use json_nbt::*;
use serde_json::json;

assert_eq!(encode(&json!({}), None).unwrap(), [0x0A, 0x00, 0x00, 0x00]);
```

# Suffix Notation

A string whose last character is `b`, `s`, `l`, `f` or `d`, and whose remaining characters
contain no letters, denotes a Byte, Short, Long, Float or Double respectively. Strings which do
not match are written as ordinary strings, suffix included.
 - Byte (`i8`): `"2b"`, `"-3b"`
 - Short (`i16`): `"17s"`, `"-1024s"`
 - Long (`i64`): `"43046721l"`
 - Float (`f32`): `"3.141f"`, `"0.0f"`
 - Double (`f64`): `"18932.214d"`, `".5d"`

A matching literal which does not fit its kind is an error rather than being clamped.

```
# use json_nbt::*;
use serde_json::json;

let root = convert::to_nbt(
    &json!({"a": "5b", "b": "5bb", "c": "1_000l"}),
    &TranscodeOptions::default(),
)
.unwrap();
assert_eq!(root.get("a"), Some(&NbtTag::Byte(5)));
assert_eq!(root.get("b"), Some(&NbtTag::from("5bb")));
assert_eq!(root.get("c"), Some(&NbtTag::from("1_000l")));

assert!(matches!(
    encode(&json!({"x": "99999999999999999999l"}), None),
    Err(TranscodeError::NumericRange { .. })
));
```

# Lists

Lists in NBT are homogenous. The element kind of a list is inferred from the first element of
the JSON array, and every other element must infer to the same kind. Empty arrays become empty
lists of End tags.

```
# use json_nbt::*;
use serde_json::json;

let error = encode(&json!({"a": [1, 2, "x"]}), None).unwrap_err();
assert!(matches!(error, TranscodeError::ListHeterogeneity { index: 2, .. }));
assert_eq!(error.to_string(), "\"x\" is not type int in list a (element 2 is String)");
```

# Errors and Options

Transcoding either succeeds for the whole document or fails with a [`TranscodeError`] naming
the offending field; no partial output is ever returned. The behavior around nested arrays,
nesting depth and string encoding can be adjusted through [`TranscodeOptions`].
*/

mod error;
/// Writes NBT tag trees in the binary format.
pub mod io;
mod options;
mod raw;
mod tag;

pub mod convert;
/// The suffix notation for explicitly typed scalars.
pub mod suffix;

pub use error::*;
pub use options::*;
pub use tag::*;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

/// Transcodes the given JSON document with the default options. The document must be a JSON
/// object. If no root name is provided, an empty name is written.
pub fn encode(document: &Value, root_name: Option<&str>) -> Result<Vec<u8>, TranscodeError> {
    encode_with(document, root_name, &TranscodeOptions::default())
}

/// Transcodes the given JSON document with the given options.
///
/// ```
/// # use json_nbt::*;
/// use json_nbt::io::StringFlavor;
/// use serde_json::json;
///
/// let document = json!({"s": "\u{10401}"});
///
/// let utf8 = encode_with(&document, None, &TranscodeOptions::default()).unwrap();
/// let java = encode_with(
///     &document,
///     None,
///     &TranscodeOptions::default().string_flavor(StringFlavor::JavaCesu8),
/// )
/// .unwrap();
///
/// // Supplementary characters take four bytes in UTF-8 but six in modified UTF-8
/// assert_eq!(java.len(), utf8.len() + 2);
/// ```
pub fn encode_with(
    document: &Value,
    root_name: Option<&str>,
    options: &TranscodeOptions,
) -> Result<Vec<u8>, TranscodeError>
{
    let root = convert::to_nbt(document, options)?;

    let mut bytes = Vec::new();
    io::write_nbt(&mut bytes, root_name, &root, options.string_flavor)?;

    debug!(
        "Encoded {} root entries into {} bytes",
        root.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Parses the given JSON text and transcodes it with the given options. See [`parse_slice`] for
/// how the text is read.
///
/// ```
/// # use json_nbt::*;
/// let text = b"{\r\n  \"a\": 1\r\n}\r\n";
/// let bytes = encode_slice(text, None, &TranscodeOptions::default()).unwrap();
/// assert_eq!(bytes, [0x0A, 0, 0, 0x03, 0, 1, b'a', 0, 0, 0, 1, 0]);
///
/// assert!(matches!(
///     encode_slice(b"{\"a\": }", None, &TranscodeOptions::default()),
///     Err(TranscodeError::Parse(_))
/// ));
/// ```
pub fn encode_slice(
    json: &[u8],
    root_name: Option<&str>,
    options: &TranscodeOptions,
) -> Result<Vec<u8>, TranscodeError>
{
    let document = parse_slice(json, options)?;
    encode_with(&document, root_name, options)
}

/// Parses the given JSON text, preserving the key order of every object.
///
/// Every carriage return and line feed byte is removed before parsing. Neither can appear
/// unescaped inside a JSON string, so this never changes the meaning of valid input.
///
/// The parser itself imposes no nesting limit; [`TranscodeOptions::max_depth`] does. Text nested
/// deeper than the limit is rejected before it is parsed, in which case the error carries the
/// root path.
///
/// ```
/// # use json_nbt::*;
/// let text = format!("{}1{}", "{\"n\":".repeat(200), "}".repeat(200));
///
/// assert!(parse_slice(text.as_bytes(), &TranscodeOptions::default()).is_ok());
/// assert!(matches!(
///     parse_slice(text.as_bytes(), &TranscodeOptions::default().max_depth(Some(199))),
///     Err(TranscodeError::DepthLimitExceeded { limit: 199, .. })
/// ));
/// ```
pub fn parse_slice(json: &[u8], options: &TranscodeOptions) -> Result<Value, TranscodeError> {
    let stripped: Vec<u8> = json
        .iter()
        .copied()
        .filter(|&byte| byte != b'\r' && byte != b'\n')
        .collect();

    if let Some(limit) = options.max_depth {
        if nesting_depth(&stripped) > limit {
            return Err(TranscodeError::DepthLimitExceeded {
                path: FieldPath::root(),
                limit,
            });
        }
    }

    let mut deserializer = serde_json::Deserializer::from_slice(&stripped);
    deserializer.disable_recursion_limit();
    let document = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(document)
}

// The deepest bracket nesting outside of string literals, counted the way the converter counts
// compounds and lists
fn nesting_depth(json: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    let mut in_string = false;
    let mut escaped = false;

    for &byte in json {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}
