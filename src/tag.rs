use indexmap::IndexMap;
use std::{
    fmt::{self, Debug, Display, Formatter},
    slice,
};

/// The closed set of tag kinds this crate emits, each carrying the numeric code used as its wire
/// discriminant.
///
/// Array tag kinds (byte, int and long arrays) are intentionally absent since no JSON shape
/// maps onto them.
///
/// ```
/// # use json_nbt::TagKind;
/// assert_eq!(TagKind::Compound.id(), 0xA);
/// assert_eq!(TagKind::String.id(), 0x8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    /// Terminates a compound, and marks the element kind of an empty list.
    End = 0x0,
    /// A signed, one-byte integer.
    Byte = 0x1,
    /// A signed, two-byte integer.
    Short = 0x2,
    /// A signed, four-byte integer.
    Int = 0x3,
    /// A signed, eight-byte integer.
    Long = 0x4,
    /// A 32-bit floating point value.
    Float = 0x5,
    /// A 64-bit floating point value.
    Double = 0x6,
    /// A length-prefixed string.
    String = 0x8,
    /// A homogenous list of unnamed tags.
    List = 0x9,
    /// A sequence of named tags terminated by [`TagKind::End`].
    Compound = 0xA,
}

impl TagKind {
    /// Returns the wire code of this tag kind.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Returns the human readable name of this tag kind.
    pub const fn name(self) -> &'static str {
        match self {
            TagKind::End => "End",
            TagKind::Byte => "Byte",
            TagKind::Short => "Short",
            TagKind::Int => "Int",
            TagKind::Long => "Long",
            TagKind::Float => "Float",
            TagKind::Double => "Double",
            TagKind::String => "String",
            TagKind::List => "List",
            TagKind::Compound => "Compound",
        }
    }
}

impl Display for TagKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single inferred NBT value. Trees of these tags are produced by [`convert::to_nbt`] and
/// consumed by [`io::write_nbt`].
///
/// [`convert::to_nbt`]: crate::convert::to_nbt
/// [`io::write_nbt`]: crate::io::write_nbt
#[derive(Clone, PartialEq)]
pub enum NbtTag {
    /// A signed, one-byte integer.
    Byte(i8),
    /// A signed, two-byte integer.
    Short(i16),
    /// A signed, four-byte integer.
    Int(i32),
    /// A signed, eight-byte integer.
    Long(i64),
    /// A 32-bit floating point value.
    Float(f32),
    /// A 64-bit floating point value.
    Double(f64),
    /// A UTF-8 string.
    String(String),
    /// An NBT tag list.
    List(NbtList),
    /// An NBT tag compound.
    Compound(NbtCompound),
}

impl NbtTag {
    /// Returns the kind of this tag.
    ///
    /// ```
    /// # use json_nbt::{NbtTag, TagKind};
    /// assert_eq!(NbtTag::Long(10).kind(), TagKind::Long);
    /// assert_eq!(NbtTag::from(true).kind(), TagKind::Byte);
    /// ```
    #[inline]
    pub fn kind(&self) -> TagKind {
        match self {
            NbtTag::Byte(_) => TagKind::Byte,
            NbtTag::Short(_) => TagKind::Short,
            NbtTag::Int(_) => TagKind::Int,
            NbtTag::Long(_) => TagKind::Long,
            NbtTag::Float(_) => TagKind::Float,
            NbtTag::Double(_) => TagKind::Double,
            NbtTag::String(_) => TagKind::String,
            NbtTag::List(_) => TagKind::List,
            NbtTag::Compound(_) => TagKind::Compound,
        }
    }

    /// Returns the suffix letter which selects this tag's kind in the JSON suffix notation, or an
    /// empty string if the kind is not expressed through a suffix.
    ///
    /// ```
    /// # use json_nbt::NbtTag;
    /// assert_eq!(NbtTag::Short(3).type_specifier(), "s");
    /// assert_eq!(NbtTag::Int(3).type_specifier(), "");
    /// ```
    pub fn type_specifier(&self) -> &str {
        match self {
            NbtTag::Byte(_) => "b",
            NbtTag::Short(_) => "s",
            NbtTag::Long(_) => "l",
            NbtTag::Float(_) => "f",
            NbtTag::Double(_) => "d",
            _ => "",
        }
    }

    /// Renders this tag as compact SNBT. This is meant for diagnostics and dry runs, the binary
    /// form is produced by the [`io`](crate::io) module.
    ///
    /// ```
    /// # use json_nbt::*;
    /// assert_eq!(NbtTag::Byte(5).to_snbt(), "5b");
    /// assert_eq!(NbtTag::String("\"Quoted text\"".to_owned()).to_snbt(), "'\"Quoted text\"'");
    ///
    /// let mut compound = NbtCompound::new();
    /// compound.insert("foo", NbtList::from(vec![-1i64, -3, -5]));
    /// assert_eq!(NbtTag::Compound(compound).to_snbt(), "{foo:[-1l,-3l,-5l]}");
    /// ```
    pub fn to_snbt(&self) -> String {
        match self {
            NbtTag::Int(value) => value.to_string(),
            NbtTag::Byte(value) => format!("{}{}", value, self.type_specifier()),
            NbtTag::Short(value) => format!("{}{}", value, self.type_specifier()),
            NbtTag::Long(value) => format!("{}{}", value, self.type_specifier()),
            NbtTag::Float(value) => format!("{}{}", value, self.type_specifier()),
            NbtTag::Double(value) => format!("{}{}", value, self.type_specifier()),
            NbtTag::String(value) => Self::string_to_snbt(value),
            NbtTag::List(value) => value.to_snbt(),
            NbtTag::Compound(value) => value.to_snbt(),
        }
    }

    /// Returns whether or not the given string needs to be quoted when used as an SNBT key.
    pub fn should_quote(string: &str) -> bool {
        string.is_empty()
            || string.chars().any(|ch| {
                matches!(ch, ':' | ',' | '"' | '\'' | '{' | '}' | '[' | ']') || ch.is_whitespace()
            })
    }

    /// Wraps the given string in quotes and escapes any quotes contained in the original string.
    pub fn string_to_snbt(string: &str) -> String {
        // Pick the surrounding quote which needs the fewest escapes
        let surrounding = if string.contains('"') { '\'' } else { '"' };

        let mut snbt_string = String::with_capacity(2 + string.len());
        snbt_string.push(surrounding);

        for ch in string.chars() {
            if ch == surrounding || ch == '\\' {
                snbt_string.push('\\');
            }
            snbt_string.push(ch);
        }

        snbt_string.push(surrounding);
        snbt_string
    }
}

impl Display for NbtTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_snbt(), f)
    }
}

impl Debug for NbtTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.to_snbt(), f)
    }
}

// Implement the from trait for all the tag's internal types
macro_rules! tag_from {
    ($($type:ty, $tag:ident);*) => {
        $(
            impl From<$type> for NbtTag {
                fn from(value: $type) -> NbtTag {
                    NbtTag::$tag(value)
                }
            }
        )*
    };
}

tag_from!(
    i8, Byte;
    i16, Short;
    i32, Int;
    i64, Long;
    f32, Float;
    f64, Double;
    String, String;
    NbtList, List;
    NbtCompound, Compound
);

impl From<&str> for NbtTag {
    fn from(value: &str) -> NbtTag {
        NbtTag::String(value.to_owned())
    }
}

impl From<bool> for NbtTag {
    fn from(value: bool) -> NbtTag {
        NbtTag::Byte(if value { 1 } else { 0 })
    }
}

/// An NBT tag list, a thin wrapper around a vec of tags.
///
/// The element kind of a list is the kind of its first element, or [`TagKind::End`] when the
/// list is empty. Homogeneity is established during inference and verified again when the
/// list is written.
#[repr(transparent)]
#[derive(Clone, PartialEq, Default)]
pub struct NbtList(pub(crate) Vec<NbtTag>);

impl NbtList {
    /// Returns a new NBT tag list with an empty internal vec.
    pub const fn new() -> Self {
        NbtList(Vec::new())
    }

    /// Returns a new NBT tag list with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        NbtList(Vec::with_capacity(capacity))
    }

    /// Returns the kind shared by every element of this list.
    ///
    /// ```
    /// # use json_nbt::{NbtList, TagKind};
    /// assert_eq!(NbtList::new().element_kind(), TagKind::End);
    /// assert_eq!(NbtList::from(vec!["a", "b"]).element_kind(), TagKind::String);
    /// ```
    pub fn element_kind(&self) -> TagKind {
        self.0.first().map_or(TagKind::End, NbtTag::kind)
    }

    /// Returns the length of this list.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if this tag list has a length of zero, false otherwise.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the tag at the given index, if any.
    pub fn get(&self, index: usize) -> Option<&NbtTag> {
        self.0.get(index)
    }

    /// Returns an iterator over the tags in this list.
    pub fn iter(&self) -> slice::Iter<'_, NbtTag> {
        self.0.iter()
    }

    /// Pushes the given value to the back of the list after wrapping it in an `NbtTag`.
    pub fn push<T: Into<NbtTag>>(&mut self, value: T) {
        self.0.push(value.into());
    }

    /// Converts this tag list to a valid SNBT string.
    pub fn to_snbt(&self) -> String {
        let mut snbt_list = String::with_capacity(2);
        snbt_list.push('[');
        snbt_list.push_str(
            &self
                .0
                .iter()
                .map(NbtTag::to_snbt)
                .collect::<Vec<String>>()
                .join(","),
        );
        snbt_list.push(']');
        snbt_list
    }
}

impl<T: Into<NbtTag>> From<Vec<T>> for NbtList {
    fn from(list: Vec<T>) -> Self {
        NbtList(list.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a NbtList {
    type IntoIter = slice::Iter<'a, NbtTag>;
    type Item = &'a NbtTag;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for NbtList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_snbt(), f)
    }
}

impl Debug for NbtList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.to_snbt(), f)
    }
}

/// An NBT tag compound, a wrapper around an insertion-ordered map of string keys to tag values.
///
/// Entries are written in the order they were inserted, which for inferred compounds is the key
/// order of the source JSON object.
///
/// ```
/// # use json_nbt::*;
/// let mut compound = NbtCompound::new();
/// compound.insert("zebra", 1i32);
/// compound.insert("apple", 2i32);
///
/// let keys: Vec<&str> = compound.iter().map(|(key, _)| key.as_str()).collect();
/// assert_eq!(keys, ["zebra", "apple"]);
/// ```
#[repr(transparent)]
#[derive(Clone, PartialEq, Default)]
pub struct NbtCompound(pub(crate) IndexMap<String, NbtTag>);

impl NbtCompound {
    /// Returns a new NBT tag compound with an empty internal map.
    pub fn new() -> Self {
        NbtCompound(IndexMap::new())
    }

    /// Returns a new NBT tag compound with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        NbtCompound(IndexMap::with_capacity(capacity))
    }

    /// Returns the number of tags in this compound.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the length of this compound is zero, false otherwise.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the tag with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&NbtTag> {
        self.0.get(name)
    }

    /// Adds the given value to this compound with the given name after wrapping that value in an
    /// `NbtTag`. Re-inserting an existing name keeps the name's original position.
    pub fn insert<K: Into<String>, T: Into<NbtTag>>(&mut self, name: K, value: T) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns an iterator over the entries of this compound in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, NbtTag> {
        self.0.iter()
    }

    /// Converts this tag compound into a valid SNBT string.
    pub fn to_snbt(&self) -> String {
        let mut snbt_compound = String::with_capacity(2);
        snbt_compound.push('{');
        snbt_compound.push_str(
            &self
                .0
                .iter()
                .map(|(key, tag)| {
                    if NbtTag::should_quote(key) {
                        format!("{}:{}", NbtTag::string_to_snbt(key), tag.to_snbt())
                    } else {
                        format!("{}:{}", key, tag.to_snbt())
                    }
                })
                .collect::<Vec<String>>()
                .join(","),
        );
        snbt_compound.push('}');
        snbt_compound
    }
}

impl<'a> IntoIterator for &'a NbtCompound {
    type IntoIter = indexmap::map::Iter<'a, String, NbtTag>;
    type Item = (&'a String, &'a NbtTag);

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for NbtCompound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_snbt(), f)
    }
}

impl Debug for NbtCompound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.to_snbt(), f)
    }
}
