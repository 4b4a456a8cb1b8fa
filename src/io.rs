use crate::{raw, NbtCompound, NbtList, NbtTag, TagKind};
use log::trace;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, Write},
};

/// Describes how string payloads (and tag names) are encoded after their two-byte length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFlavor {
    /// Plain UTF-8. The length prefix is the UTF-8 byte length of the string.
    Utf8,
    /// Java's modified UTF-8, in which NUL is written as two bytes and supplementary characters
    /// are written as surrogate pairs. This is what the JVM itself reads and writes.
    JavaCesu8,
}

impl Default for StringFlavor {
    fn default() -> Self {
        StringFlavor::Utf8
    }
}

/// Writes the given compound as a named root compound tag. If no root name is provided, an empty
/// string is used.
///
/// The root compound's own End byte closes the document; nothing is appended after it.
///
/// ```
/// # use json_nbt::{NbtCompound, io::{self, StringFlavor}};
/// let mut bytes = Vec::new();
/// io::write_nbt(&mut bytes, None, &NbtCompound::new(), StringFlavor::Utf8).unwrap();
/// assert_eq!(bytes, [0x0A, 0x00, 0x00, 0x00]);
/// ```
pub fn write_nbt<W: Write>(
    writer: &mut W,
    root_name: Option<&str>,
    root: &NbtCompound,
    flavor: StringFlavor,
) -> Result<(), NbtIoError>
{
    raw::write_u8(writer, TagKind::Compound.id())?;
    write_string(writer, root_name.unwrap_or(""), flavor)?;
    write_compound_body(writer, root, flavor)
}

/// Writes the payload of a single tag, without its kind byte or name. This is the form list
/// elements take.
pub fn write_tag_body<W: Write>(
    writer: &mut W,
    tag: &NbtTag,
    flavor: StringFlavor,
) -> Result<(), NbtIoError>
{
    match tag {
        &NbtTag::Byte(value) => raw::write_i8(writer, value)?,
        &NbtTag::Short(value) => raw::write_i16(writer, value)?,
        &NbtTag::Int(value) => raw::write_i32(writer, value)?,
        &NbtTag::Long(value) => raw::write_i64(writer, value)?,
        &NbtTag::Float(value) => raw::write_f32(writer, value)?,
        &NbtTag::Double(value) => raw::write_f64(writer, value)?,
        NbtTag::String(value) => write_string(writer, value, flavor)?,
        NbtTag::List(value) => write_list_body(writer, value, flavor)?,
        NbtTag::Compound(value) => write_compound_body(writer, value, flavor)?,
    }

    Ok(())
}

fn write_string<W: Write>(
    writer: &mut W,
    string: &str,
    flavor: StringFlavor,
) -> Result<(), NbtIoError>
{
    let encoded = raw::encode_string(string, flavor);
    let len = u16::try_from(encoded.len()).map_err(|_| NbtIoError::StringTooLong(encoded.len()))?;
    raw::write_u16(writer, len)?;
    writer.write_all(&encoded)?;
    Ok(())
}

fn write_list_body<W: Write>(
    writer: &mut W,
    list: &NbtList,
    flavor: StringFlavor,
) -> Result<(), NbtIoError>
{
    let type_id = list.element_kind().id();
    let len = i32::try_from(list.len()).map_err(|_| NbtIoError::ListTooLong(list.len()))?;
    raw::write_u8(writer, type_id)?;
    raw::write_i32(writer, len)?;

    // An End-kind list is always empty, so its payload is zero bytes
    for sub_tag in list {
        if sub_tag.kind().id() != type_id {
            return Err(NbtIoError::NonHomogenousList);
        }

        write_tag_body(writer, sub_tag, flavor)?;
    }

    Ok(())
}

fn write_compound_body<W: Write>(
    writer: &mut W,
    compound: &NbtCompound,
    flavor: StringFlavor,
) -> Result<(), NbtIoError>
{
    for (name, tag) in compound {
        trace!("Writing {} tag \"{}\"", tag.kind(), name);
        raw::write_u8(writer, tag.kind().id())?;
        write_string(writer, name, flavor)?;
        write_tag_body(writer, tag, flavor)?;
    }

    // TAG_End
    raw::write_u8(writer, TagKind::End.id())?;
    Ok(())
}

/// Describes an error which occurred while writing NBT data.
#[derive(Debug)]
pub enum NbtIoError {
    /// A native I/O error.
    StdIo(io::Error),
    /// A list contained a tag whose kind differs from the list's first element.
    NonHomogenousList,
    /// An encoded string or tag name did not fit its two-byte length prefix.
    StringTooLong(usize),
    /// A list held more elements than its four-byte signed count can describe.
    ListTooLong(usize),
}

impl From<io::Error> for NbtIoError {
    fn from(error: io::Error) -> Self {
        NbtIoError::StdIo(error)
    }
}

impl Display for NbtIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NbtIoError::StdIo(error) => write!(f, "{}", error),
            NbtIoError::NonHomogenousList =>
                write!(f, "Encountered non-homogenous list while writing"),
            &NbtIoError::StringTooLong(len) => write!(
                f,
                "String of {} bytes exceeds the maximum length of {}",
                len,
                u16::MAX
            ),
            &NbtIoError::ListTooLong(len) => write!(
                f,
                "List of {} elements exceeds the maximum length of {}",
                len,
                i32::MAX
            ),
        }
    }
}

impl Error for NbtIoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NbtIoError::StdIo(error) => Some(error),
            _ => None,
        }
    }
}
