use bytes::{Buf, BufMut};
use thiserror::Error;

pub mod compound;
pub mod tag;

pub use compound::NbtCompound;
pub use tag::NbtTag;

pub const END_ID: u8 = 0x00;
pub const BYTE_ID: u8 = 0x01;
pub const SHORT_ID: u8 = 0x02;
pub const INT_ID: u8 = 0x03;
pub const LONG_ID: u8 = 0x04;
pub const FLOAT_ID: u8 = 0x05;
pub const DOUBLE_ID: u8 = 0x06;
pub const BYTE_ARRAY_ID: u8 = 0x07;
pub const STRING_ID: u8 = 0x08;
pub const LIST_ID: u8 = 0x09;
pub const COMPOUND_ID: u8 = 0x0A;
pub const INT_ARRAY_ID: u8 = 0x0B;
pub const LONG_ARRAY_ID: u8 = 0x0C;

/// Deepest compound/list nesting accepted while reading.
pub const MAX_DEPTH: usize = 512;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("NBT data ended early, {0} more bytes expected")]
    Incomplete(usize),
    #[error("The root tag of the NBT data is not a compound, got id {0}")]
    NoRootCompound(u8),
    #[error("Encountered an unknown NBT tag id {0}")]
    UnknownTagId(u8),
    #[error("String is not valid modified UTF-8")]
    Cesu8DecodingError,
    #[error("Negative length {0}")]
    NegativeLength(i32),
    #[error("Length {0} is too large")]
    LargeLength(usize),
    #[error("List elements do not share one tag type")]
    MixedList,
    #[error("NBT nesting is deeper than {MAX_DEPTH}")]
    DepthLimit,
}

pub(crate) fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), Error> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(Error::Incomplete(needed - remaining));
    }
    Ok(())
}

pub fn get_nbt_string(buf: &mut impl Buf) -> Result<String, Error> {
    ensure_remaining(buf, 2)?;
    let len = buf.get_u16() as usize;
    ensure_remaining(buf, len)?;
    let bytes = buf.copy_to_bytes(len);
    let string = cesu8::from_java_cesu8(&bytes).map_err(|_| Error::Cesu8DecodingError)?;
    Ok(string.into_owned())
}

pub fn put_nbt_string(buf: &mut impl BufMut, string: &str) -> Result<(), Error> {
    let encoded = cesu8::to_java_cesu8(string);
    let len = u16::try_from(encoded.len()).map_err(|_| Error::LargeLength(encoded.len()))?;
    buf.put_u16(len);
    buf.put_slice(&encoded);
    Ok(())
}

/// Whether `string` is short enough to be written as an NBT string.
pub fn fits_nbt_string(string: &str) -> bool {
    cesu8::to_java_cesu8(string).len() <= u16::MAX as usize
}

/// Writes a named root compound, the layout used for data at rest.
pub fn to_bytes(compound: &NbtCompound, name: &str, buf: &mut impl BufMut) -> Result<(), Error> {
    buf.put_u8(COMPOUND_ID);
    put_nbt_string(buf, name)?;
    compound.serialize_content(buf)
}

/// Writes a root compound without a name, the layout sent to clients since 1.20.2.
pub fn to_bytes_unnamed(compound: &NbtCompound, buf: &mut impl BufMut) -> Result<(), Error> {
    buf.put_u8(COMPOUND_ID);
    compound.serialize_content(buf)
}

pub fn from_bytes(buf: &mut impl Buf) -> Result<(String, NbtCompound), Error> {
    read_root_id(buf)?;
    let name = get_nbt_string(buf)?;
    let compound = NbtCompound::deserialize_content(buf, 0)?;
    Ok((name, compound))
}

pub fn from_bytes_unnamed(buf: &mut impl Buf) -> Result<NbtCompound, Error> {
    read_root_id(buf)?;
    NbtCompound::deserialize_content(buf, 0)
}

fn read_root_id(buf: &mut impl Buf) -> Result<(), Error> {
    ensure_remaining(buf, 1)?;
    let id = buf.get_u8();
    if id != COMPOUND_ID {
        return Err(Error::NoRootCompound(id));
    }
    Ok(())
}
