//! Type inference from JSON values to NBT tags.
//!
//! Inference is total over the JSON value space and follows a fixed precedence:
//!  - `null` becomes an Int of `0`
//!  - booleans become a Byte of `1` or `0`
//!  - numbers become an Int, and must be integral and fit in 32 bits
//!  - arrays become a List whose element kind is that of the first element
//!  - objects become a Compound, keeping their key order
//!  - strings in suffix notation (see [`suffix`](crate::suffix)) become the scalar they denote,
//!    every other string becomes a String
//!
//! ```
//! # use json_nbt::{convert, NbtTag, TranscodeOptions};
//! use serde_json::json;
//!
//! let options = TranscodeOptions::default();
//! assert_eq!(convert::to_tag(&json!(null), &options).unwrap(), NbtTag::Int(0));
//! assert_eq!(convert::to_tag(&json!(true), &options).unwrap(), NbtTag::Byte(1));
//! assert_eq!(convert::to_tag(&json!(-7), &options).unwrap(), NbtTag::Int(-7));
//! assert_eq!(convert::to_tag(&json!("7s"), &options).unwrap(), NbtTag::Short(7));
//! assert_eq!(convert::to_tag(&json!("7 days"), &options).unwrap(), NbtTag::from("7 days"));
//! ```

use crate::{
    error::{FieldPath, Step},
    options::{NestedLists, TranscodeOptions},
    raw,
    suffix,
    NbtCompound,
    NbtList,
    NbtTag,
    TagKind,
    TranscodeError,
};
use log::debug;
use serde_json::{Map, Number, Value};

// Offending values are quoted in errors up to this many characters
const MAX_RENDERED_WIDTH: usize = 32;

/// Infers the tag tree of a whole document. The document must be a JSON object, which becomes
/// the root compound.
///
/// ```
/// # use json_nbt::{convert, NbtTag, TranscodeOptions};
/// use serde_json::json;
///
/// let root = convert::to_nbt(
///     &json!({"name": "Steve", "health": "20.0f", "flags": [true, false]}),
///     &TranscodeOptions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(root.to_snbt(), r#"{name:"Steve",health:20f,flags:[1b,0b]}"#);
/// assert!(convert::to_nbt(&json!([1, 2]), &TranscodeOptions::default()).is_err());
/// ```
pub fn to_nbt(document: &Value, options: &TranscodeOptions) -> Result<NbtCompound, TranscodeError> {
    let map = match document {
        Value::Object(map) => map,
        _ =>
            return Err(TranscodeError::UnsupportedStructure {
                path: FieldPath::root(),
                reason: "the document root must be a JSON object",
            }),
    };

    let root = Converter::new(options).compound(map)?;
    debug!("Inferred root compound with {} entries", root.len());
    Ok(root)
}

/// Infers the tag for a single JSON value, which may be of any shape.
pub fn to_tag(value: &Value, options: &TranscodeOptions) -> Result<NbtTag, TranscodeError> {
    Converter::new(options).infer(value)
}

struct Converter<'a> {
    options: &'a TranscodeOptions,
    path: Vec<Step<'a>>,
    depth: usize,
}

impl<'a> Converter<'a> {
    fn new(options: &'a TranscodeOptions) -> Self {
        Converter {
            options,
            path: Vec::new(),
            depth: 0,
        }
    }

    fn infer(&mut self, value: &'a Value) -> Result<NbtTag, TranscodeError> {
        let tag = match value {
            Value::Null => NbtTag::Int(0),
            &Value::Bool(value) => NbtTag::from(value),
            Value::Number(number) => NbtTag::Int(self.int(number)?),
            Value::String(string) => self.string(string)?,
            Value::Array(array) => NbtTag::List(self.list(array)?),
            Value::Object(map) => NbtTag::Compound(self.compound(map)?),
        };

        Ok(tag)
    }

    fn int(&self, number: &Number) -> Result<i32, TranscodeError> {
        let value = match number.as_i64() {
            Some(int) => i32::try_from(int).ok(),
            None => number
                .as_f64()
                .filter(|float| {
                    float.fract() == 0.0
                        && *float >= f64::from(i32::MIN)
                        && *float <= f64::from(i32::MAX)
                })
                .map(|float| float as i32),
        };

        value.ok_or_else(|| TranscodeError::NumericRange {
            path: self.error_path(),
            value: number.to_string().into_boxed_str(),
            target: TagKind::Int,
        })
    }

    fn string(&self, string: &str) -> Result<NbtTag, TranscodeError> {
        match suffix::parse(string) {
            Ok(Some(tag)) => Ok(tag),
            Ok(None) => {
                self.check_length(string)?;
                Ok(NbtTag::String(string.to_owned()))
            }
            Err(error) => Err(TranscodeError::NumericRange {
                path: self.error_path(),
                value: string.into(),
                target: error.target(),
            }),
        }
    }

    fn list(&mut self, array: &'a [Value]) -> Result<NbtList, TranscodeError> {
        self.enter()?;

        let mut list = NbtList::with_capacity(array.len());
        match array.first() {
            None => {}
            // Every element of a list led by null collapses to an Int of 0
            Some(Value::Null) => (0 .. array.len()).for_each(|_| list.push(0i32)),
            Some(_) =>
                for (index, element) in array.iter().enumerate() {
                    if element.is_array() && self.options.nested_lists == NestedLists::Forbid {
                        self.path.push(Step::Index(index));
                        return Err(TranscodeError::UnsupportedStructure {
                            path: self.error_path(),
                            reason: "arrays nested inside arrays are forbidden",
                        });
                    }

                    // Ensure type homogeneity before the element's own contents are checked
                    let expected = list.element_kind();
                    let found = shallow_kind(element);
                    if index > 0 && found != expected {
                        return Err(TranscodeError::ListHeterogeneity {
                            path: self.error_path(),
                            index,
                            expected,
                            found,
                            value: render(element),
                        });
                    }

                    self.path.push(Step::Index(index));
                    let tag = self.infer(element)?;
                    self.path.pop();

                    list.push(tag);
                },
        }

        debug!(
            "Inferred {} list of {} elements at {}",
            list.element_kind(),
            list.len(),
            FieldPath::from_steps(&self.path)
        );

        self.depth -= 1;
        Ok(list)
    }

    fn compound(&mut self, map: &'a Map<String, Value>) -> Result<NbtCompound, TranscodeError> {
        self.enter()?;

        let mut compound = NbtCompound::with_capacity(map.len());
        for (key, value) in map {
            self.path.push(Step::Key(key));
            self.check_length(key)?;
            let tag = self.infer(value)?;
            self.path.pop();

            compound.insert(key.as_str(), tag);
        }

        self.depth -= 1;
        Ok(compound)
    }

    fn enter(&mut self) -> Result<(), TranscodeError> {
        self.depth += 1;
        match self.options.max_depth {
            Some(limit) if self.depth > limit => Err(TranscodeError::DepthLimitExceeded {
                path: self.error_path(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    fn check_length(&self, string: &str) -> Result<(), TranscodeError> {
        let length = raw::encoded_len(string, self.options.string_flavor);
        if length > usize::from(u16::MAX) {
            return Err(TranscodeError::StringTooLong {
                path: self.error_path(),
                length,
            });
        }

        Ok(())
    }

    fn error_path(&self) -> FieldPath {
        FieldPath::from_steps(&self.path)
    }
}

// The kind a value infers to, decided without descending into it
fn shallow_kind(value: &Value) -> TagKind {
    match value {
        Value::Null | Value::Number(_) => TagKind::Int,
        Value::Bool(_) => TagKind::Byte,
        Value::String(string) => suffix::kind_of(string).unwrap_or(TagKind::String),
        Value::Array(_) => TagKind::List,
        Value::Object(_) => TagKind::Compound,
    }
}

fn render(value: &Value) -> Box<str> {
    let mut rendered = value.to_string();
    if let Some((cut, _)) = rendered.char_indices().nth(MAX_RENDERED_WIDTH) {
        rendered.truncate(cut);
        rendered.push_str("...");
    }

    rendered.into_boxed_str()
}
