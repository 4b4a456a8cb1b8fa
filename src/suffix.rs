use crate::{NbtTag, TagKind};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// The scalar kinds selectable through a suffix letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    /// `b`
    Byte,
    /// `s`
    Short,
    /// `l`
    Long,
    /// `f`
    Float,
    /// `d`
    Double,
}

impl Suffix {
    /// Returns the tag kind this suffix selects.
    pub const fn kind(self) -> TagKind {
        match self {
            Suffix::Byte => TagKind::Byte,
            Suffix::Short => TagKind::Short,
            Suffix::Long => TagKind::Long,
            Suffix::Float => TagKind::Float,
            Suffix::Double => TagKind::Double,
        }
    }
}

/// Splits a string in suffix notation into its numeric prefix and the suffix selected by its
/// trailing letter.
///
/// A string is in suffix notation when its last character is one of `b`, `s`, `l`, `f` or `d`
/// and the rest of it contains no ASCII letters. Whether the prefix is actually a number is
/// decided later by [`parse`].
///
/// ```
/// # use json_nbt::suffix::{self, Suffix};
/// assert_eq!(suffix::split("-12s"), Some(("-12", Suffix::Short)));
/// assert_eq!(suffix::split("d"), Some(("", Suffix::Double)));
/// assert_eq!(suffix::split("5bb"), None); // The prefix contains a letter
/// assert_eq!(suffix::split("5B"), None); // Suffixes are lowercase
/// ```
pub fn split(string: &str) -> Option<(&str, Suffix)> {
    // Every suffix letter is a single byte, so slicing off the last byte is sound
    let suffix = match string.as_bytes().last()? {
        b'b' => Suffix::Byte,
        b's' => Suffix::Short,
        b'l' => Suffix::Long,
        b'f' => Suffix::Float,
        b'd' => Suffix::Double,
        _ => return None,
    };

    let prefix = &string[.. string.len() - 1];
    if prefix.bytes().any(|byte| byte.is_ascii_alphabetic()) {
        return None;
    }

    Some((prefix, suffix))
}

/// Parses a string in suffix notation into the scalar tag it denotes.
///
/// Returns `Ok(None)` when the string should be encoded as a plain string instead, either because
/// it is not in suffix notation or because its prefix is not a decimal literal. Returns an error
/// when the prefix is a decimal literal which does not fit the selected kind.
///
/// ```
/// # use json_nbt::{suffix, NbtTag};
/// assert_eq!(suffix::parse("5b").unwrap(), Some(NbtTag::Byte(5)));
/// assert_eq!(suffix::parse("-2.5f").unwrap(), Some(NbtTag::Float(-2.5)));
/// assert_eq!(suffix::parse("1_000l").unwrap(), None);
/// assert_eq!(suffix::parse("hello").unwrap(), None);
///
/// assert!(suffix::parse("128b").is_err());
/// assert!(suffix::parse("1.5s").is_err());
/// ```
pub fn parse(string: &str) -> Result<Option<NbtTag>, LiteralRangeError> {
    let (prefix, suffix) = match literal(string) {
        Some(literal) => literal,
        None => return Ok(None),
    };

    let out_of_range = || LiteralRangeError::new(prefix, suffix.kind());

    // The literal grammar has already been checked, so any failure below is a range failure
    let tag = match suffix {
        Suffix::Byte => NbtTag::Byte(prefix.parse().map_err(|_| out_of_range())?),
        Suffix::Short => NbtTag::Short(prefix.parse().map_err(|_| out_of_range())?),
        Suffix::Long => NbtTag::Long(prefix.parse().map_err(|_| out_of_range())?),
        Suffix::Float => {
            let value: f32 = prefix.parse().map_err(|_| out_of_range())?;
            if value.is_infinite() {
                return Err(out_of_range());
            }
            NbtTag::Float(value)
        }
        Suffix::Double => {
            let value: f64 = prefix.parse().map_err(|_| out_of_range())?;
            if value.is_infinite() {
                return Err(out_of_range());
            }
            NbtTag::Double(value)
        }
    };

    Ok(Some(tag))
}

/// Returns the tag kind the given string would parse to, without checking whether its literal
/// fits that kind. Strings which are not in suffix notation with a decimal prefix yield `None`.
///
/// ```
/// # use json_nbt::{suffix, TagKind};
/// assert_eq!(suffix::kind_of("300b"), Some(TagKind::Byte));
/// assert_eq!(suffix::kind_of("1_000l"), None);
/// ```
pub fn kind_of(string: &str) -> Option<TagKind> {
    literal(string).map(|(_, suffix)| suffix.kind())
}

fn literal(string: &str) -> Option<(&str, Suffix)> {
    split(string).filter(|(prefix, _)| is_decimal_literal(prefix))
}

// Matches [+-]?(digits(.digits?)?|.digits)
fn is_decimal_literal(prefix: &str) -> bool {
    let unsigned = prefix
        .strip_prefix(|ch: char| ch == '+' || ch == '-')
        .unwrap_or(prefix);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    let has_digits = !whole.is_empty() || fraction.map_or(false, |fraction| !fraction.is_empty());

    has_digits && all_digits(whole) && fraction.map_or(true, all_digits)
}

/// A decimal literal in suffix notation which does not fit the tag kind its suffix selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRangeError {
    literal: Box<str>,
    target: TagKind,
}

impl LiteralRangeError {
    fn new(literal: &str, target: TagKind) -> Self {
        LiteralRangeError {
            literal: literal.into(),
            target,
        }
    }

    /// Returns the numeric prefix which failed to fit.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Returns the tag kind selected by the suffix.
    pub fn target(&self) -> TagKind {
        self.target
    }
}

impl Display for LiteralRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} does not fit in a {} tag",
            self.literal,
            self.target.name().to_lowercase()
        )
    }
}

impl Error for LiteralRangeError {}
