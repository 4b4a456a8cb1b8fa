use crate::{io::NbtIoError, NbtTag, TagKind};
use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
};

/// The location of a value inside the source JSON document, such as `outer.inner[2]`.
///
/// The root object itself has an empty path, displayed as `<root>`. Keys which are empty or
/// contain `.`, `[`, `]` or quotes are displayed quoted.
///
/// ```
/// # use serde_json::json;
/// let error = json_nbt::encode(&json!({"a.b": [1, "x"]}), None).unwrap_err();
/// assert_eq!(error.path().unwrap().to_string(), "\"a.b\"");
///
/// let error = json_nbt::encode(&json!({"a": {"b": [1, "x"]}}), None).unwrap_err();
/// assert_eq!(error.path().unwrap().to_string(), "a.b");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// An object key.
    Key(Box<str>),
    /// An array index.
    Index(usize),
}

impl FieldPath {
    /// Returns the path of the root object.
    pub const fn root() -> Self {
        FieldPath {
            segments: Vec::new(),
        }
    }

    /// Returns the steps of this path, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns true if this path points at the root object.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub(crate) fn from_steps(steps: &[Step<'_>]) -> Self {
        FieldPath {
            segments: steps
                .iter()
                .map(|step| match *step {
                    Step::Key(key) => PathSegment::Key(key.into()),
                    Step::Index(index) => PathSegment::Index(index),
                })
                .collect(),
        }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }

                    if needs_quotes(key) {
                        f.write_str(&NbtTag::string_to_snbt(key))?;
                    } else {
                        f.write_str(key)?;
                    }
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }

        Ok(())
    }
}

// Keys which would read as path syntax, or which are empty, are quoted
fn needs_quotes(key: &str) -> bool {
    key.is_empty() || key.contains(|ch: char| matches!(ch, '.' | '[' | ']' | '"' | '\''))
}

impl Debug for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.to_string(), f)
    }
}

// Borrowed form of a path segment, kept by the converter while it walks the document
#[derive(Clone, Copy)]
pub(crate) enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

/// Describes an error which aborted the transcoding of a document. No bytes are produced for a
/// document that fails with one of these.
#[derive(Debug)]
pub enum TranscodeError {
    /// The input was not valid JSON.
    Parse(serde_json::Error),
    /// An element of a list inferred to a different tag kind than the list's first element.
    ListHeterogeneity {
        /// The list field.
        path: FieldPath,
        /// The index of the offending element.
        index: usize,
        /// The element kind established by the first element.
        expected: TagKind,
        /// The kind the offending element inferred to.
        found: TagKind,
        /// A compact rendering of the offending element.
        value: Box<str>,
    },
    /// A number did not fit the tag kind it was destined for, or was not integral where an
    /// integer was required.
    NumericRange {
        /// The field holding the number.
        path: FieldPath,
        /// The offending literal.
        value: Box<str>,
        /// The tag kind the literal was parsed for.
        target: TagKind,
    },
    /// A structure was encountered which the active options do not allow.
    UnsupportedStructure {
        /// The offending field.
        path: FieldPath,
        /// What was not supported.
        reason: &'static str,
    },
    /// The document nests compounds and lists deeper than the configured limit.
    DepthLimitExceeded {
        /// The first field beyond the limit.
        path: FieldPath,
        /// The configured limit.
        limit: usize,
    },
    /// A string or key does not fit the two-byte length prefix once encoded.
    StringTooLong {
        /// The field holding the string, or the field named by the key.
        path: FieldPath,
        /// The encoded length in bytes.
        length: usize,
    },
    /// The binary writer failed.
    Io(NbtIoError),
}

impl TranscodeError {
    /// Returns the location of the offending value, if this error is tied to one.
    ///
    /// ```
    /// # use serde_json::json;
    /// let error = json_nbt::encode(&json!({"a": [1, 2, "x"]}), None).unwrap_err();
    /// assert_eq!(error.path().unwrap().to_string(), "a");
    /// ```
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            TranscodeError::ListHeterogeneity { path, .. }
            | TranscodeError::NumericRange { path, .. }
            | TranscodeError::UnsupportedStructure { path, .. }
            | TranscodeError::DepthLimitExceeded { path, .. }
            | TranscodeError::StringTooLong { path, .. } => Some(path),
            TranscodeError::Parse(_) | TranscodeError::Io(_) => None,
        }
    }
}

impl From<NbtIoError> for TranscodeError {
    fn from(error: NbtIoError) -> Self {
        TranscodeError::Io(error)
    }
}

impl From<serde_json::Error> for TranscodeError {
    fn from(error: serde_json::Error) -> Self {
        TranscodeError::Parse(error)
    }
}

impl Display for TranscodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TranscodeError::Parse(error) => write!(f, "Invalid JSON: {}", error),
            TranscodeError::ListHeterogeneity {
                path,
                index,
                expected,
                found,
                value,
            } => write!(
                f,
                "{} is not type {} in list {} (element {} is {})",
                value,
                expected.name().to_lowercase(),
                path,
                index,
                found
            ),
            TranscodeError::NumericRange {
                path,
                value,
                target,
            } => write!(
                f,
                "{} does not fit in a {} tag at {}",
                value,
                target.name().to_lowercase(),
                path
            ),
            TranscodeError::UnsupportedStructure { path, reason } =>
                write!(f, "Unsupported structure at {}: {}", path, reason),
            TranscodeError::DepthLimitExceeded { path, limit } => write!(
                f,
                "Nesting depth exceeds the limit of {} at {}",
                limit, path
            ),
            TranscodeError::StringTooLong { path, length } => write!(
                f,
                "String of {} bytes at {} exceeds the maximum length of {}",
                length,
                path,
                u16::MAX
            ),
            TranscodeError::Io(error) => Display::fmt(error, f),
        }
    }
}

impl Error for TranscodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TranscodeError::Parse(error) => Some(error),
            TranscodeError::Io(error) => Some(error),
            _ => None,
        }
    }
}
