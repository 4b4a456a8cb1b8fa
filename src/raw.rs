use crate::io::StringFlavor;
use byteorder::{BigEndian, WriteBytesExt};
use std::{
    borrow::Cow,
    io::{Result, Write},
};

#[inline]
pub fn write_u8<W: Write>(writer: &mut W, value: u8) -> Result<()> {
    writer.write_u8(value)
}

#[inline]
pub fn write_i8<W: Write>(writer: &mut W, value: i8) -> Result<()> {
    writer.write_i8(value)
}

#[inline]
pub fn write_i16<W: Write>(writer: &mut W, value: i16) -> Result<()> {
    writer.write_i16::<BigEndian>(value)
}

#[inline]
pub fn write_u16<W: Write>(writer: &mut W, value: u16) -> Result<()> {
    writer.write_u16::<BigEndian>(value)
}

#[inline]
pub fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    writer.write_i32::<BigEndian>(value)
}

#[inline]
pub fn write_i64<W: Write>(writer: &mut W, value: i64) -> Result<()> {
    writer.write_i64::<BigEndian>(value)
}

#[inline]
pub fn write_f32<W: Write>(writer: &mut W, value: f32) -> Result<()> {
    writer.write_f32::<BigEndian>(value)
}

#[inline]
pub fn write_f64<W: Write>(writer: &mut W, value: f64) -> Result<()> {
    writer.write_f64::<BigEndian>(value)
}

/// Returns the bytes which follow a string's length prefix in the given flavor.
pub fn encode_string(string: &str, flavor: StringFlavor) -> Cow<'_, [u8]> {
    match flavor {
        StringFlavor::Utf8 => Cow::Borrowed(string.as_bytes()),
        StringFlavor::JavaCesu8 => cesu8::to_java_cesu8(string),
    }
}

/// Returns the length of the given string once encoded, without allocating for pure UTF-8.
#[inline]
pub fn encoded_len(string: &str, flavor: StringFlavor) -> usize {
    encode_string(string, flavor).len()
}
