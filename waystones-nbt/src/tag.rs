use std::fmt;

use bytes::{Buf, BufMut};

use crate::{
    BYTE_ARRAY_ID, BYTE_ID, COMPOUND_ID, DOUBLE_ID, END_ID, Error, FLOAT_ID, INT_ARRAY_ID, INT_ID,
    LIST_ID, LONG_ARRAY_ID, LONG_ID, MAX_DEPTH, SHORT_ID, STRING_ID, compound::NbtCompound,
    ensure_remaining, get_nbt_string, put_nbt_string,
};

#[derive(Clone, Debug, PartialEq)]
pub enum NbtTag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Box<[u8]>),
    String(String),
    List(Vec<NbtTag>),
    Compound(NbtCompound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl NbtTag {
    pub const fn get_type_id(&self) -> u8 {
        match self {
            Self::End => END_ID,
            Self::Byte(_) => BYTE_ID,
            Self::Short(_) => SHORT_ID,
            Self::Int(_) => INT_ID,
            Self::Long(_) => LONG_ID,
            Self::Float(_) => FLOAT_ID,
            Self::Double(_) => DOUBLE_ID,
            Self::ByteArray(_) => BYTE_ARRAY_ID,
            Self::String(_) => STRING_ID,
            Self::List(_) => LIST_ID,
            Self::Compound(_) => COMPOUND_ID,
            Self::IntArray(_) => INT_ARRAY_ID,
            Self::LongArray(_) => LONG_ARRAY_ID,
        }
    }

    pub fn serialize_data(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        match self {
            Self::End => {}
            Self::Byte(byte) => buf.put_i8(*byte),
            Self::Short(short) => buf.put_i16(*short),
            Self::Int(int) => buf.put_i32(*int),
            Self::Long(long) => buf.put_i64(*long),
            Self::Float(float) => buf.put_f32(*float),
            Self::Double(double) => buf.put_f64(*double),
            Self::ByteArray(byte_array) => {
                buf.put_i32(array_len(byte_array.len())?);
                buf.put_slice(byte_array);
            }
            Self::String(string) => put_nbt_string(buf, string)?,
            Self::List(list) => {
                let element_id = list.first().map_or(END_ID, NbtTag::get_type_id);
                if list.iter().any(|tag| tag.get_type_id() != element_id) {
                    return Err(Error::MixedList);
                }
                buf.put_u8(element_id);
                buf.put_i32(array_len(list.len())?);
                for tag in list {
                    tag.serialize_data(buf)?;
                }
            }
            Self::Compound(compound) => compound.serialize_content(buf)?,
            Self::IntArray(int_array) => {
                buf.put_i32(array_len(int_array.len())?);
                for int in int_array {
                    buf.put_i32(*int);
                }
            }
            Self::LongArray(long_array) => {
                buf.put_i32(array_len(long_array.len())?);
                for long in long_array {
                    buf.put_i64(*long);
                }
            }
        }
        Ok(())
    }

    pub fn deserialize_data(buf: &mut impl Buf, tag_id: u8, depth: usize) -> Result<Self, Error> {
        match tag_id {
            END_ID => Ok(Self::End),
            BYTE_ID => {
                ensure_remaining(buf, 1)?;
                Ok(Self::Byte(buf.get_i8()))
            }
            SHORT_ID => {
                ensure_remaining(buf, 2)?;
                Ok(Self::Short(buf.get_i16()))
            }
            INT_ID => {
                ensure_remaining(buf, 4)?;
                Ok(Self::Int(buf.get_i32()))
            }
            LONG_ID => {
                ensure_remaining(buf, 8)?;
                Ok(Self::Long(buf.get_i64()))
            }
            FLOAT_ID => {
                ensure_remaining(buf, 4)?;
                Ok(Self::Float(buf.get_f32()))
            }
            DOUBLE_ID => {
                ensure_remaining(buf, 8)?;
                Ok(Self::Double(buf.get_f64()))
            }
            BYTE_ARRAY_ID => {
                let len = read_len(buf, 1)?;
                let bytes = buf.copy_to_bytes(len);
                Ok(Self::ByteArray(bytes.to_vec().into_boxed_slice()))
            }
            STRING_ID => Ok(Self::String(get_nbt_string(buf)?)),
            LIST_ID => {
                if depth >= MAX_DEPTH {
                    return Err(Error::DepthLimit);
                }
                ensure_remaining(buf, 1)?;
                let element_id = buf.get_u8();
                let len = read_len(buf, 1)?;
                if element_id == END_ID && len > 0 {
                    return Err(Error::UnknownTagId(END_ID));
                }
                let mut list = Vec::with_capacity(len.min(buf.remaining()));
                for _ in 0..len {
                    list.push(Self::deserialize_data(buf, element_id, depth + 1)?);
                }
                Ok(Self::List(list))
            }
            COMPOUND_ID => Ok(Self::Compound(NbtCompound::deserialize_content(
                buf,
                depth + 1,
            )?)),
            INT_ARRAY_ID => {
                let len = read_len(buf, 4)?;
                Ok(Self::IntArray((0..len).map(|_| buf.get_i32()).collect()))
            }
            LONG_ARRAY_ID => {
                let len = read_len(buf, 8)?;
                Ok(Self::LongArray((0..len).map(|_| buf.get_i64()).collect()))
            }
            unknown => Err(Error::UnknownTagId(unknown)),
        }
    }

    pub fn extract_byte(&self) -> Option<i8> {
        match self {
            Self::Byte(byte) => Some(*byte),
            _ => None,
        }
    }

    pub fn extract_bool(&self) -> Option<bool> {
        self.extract_byte().map(|byte| byte != 0)
    }

    pub fn extract_short(&self) -> Option<i16> {
        match self {
            Self::Short(short) => Some(*short),
            _ => None,
        }
    }

    pub fn extract_int(&self) -> Option<i32> {
        match self {
            Self::Int(int) => Some(*int),
            _ => None,
        }
    }

    pub fn extract_long(&self) -> Option<i64> {
        match self {
            Self::Long(long) => Some(*long),
            _ => None,
        }
    }

    pub fn extract_float(&self) -> Option<f32> {
        match self {
            Self::Float(float) => Some(*float),
            _ => None,
        }
    }

    pub fn extract_double(&self) -> Option<f64> {
        match self {
            Self::Double(double) => Some(*double),
            _ => None,
        }
    }

    pub fn extract_string(&self) -> Option<&str> {
        match self {
            Self::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn extract_list(&self) -> Option<&[NbtTag]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn extract_compound(&self) -> Option<&NbtCompound> {
        match self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    pub fn extract_int_array(&self) -> Option<&[i32]> {
        match self {
            Self::IntArray(int_array) => Some(int_array),
            _ => None,
        }
    }

    pub fn extract_long_array(&self) -> Option<&[i64]> {
        match self {
            Self::LongArray(long_array) => Some(long_array),
            _ => None,
        }
    }
}

fn array_len(len: usize) -> Result<i32, Error> {
    i32::try_from(len).map_err(|_| Error::LargeLength(len))
}

/// Reads an i32 length prefix and checks that `len * element_size` bytes follow.
fn read_len(buf: &mut impl Buf, element_size: usize) -> Result<usize, Error> {
    ensure_remaining(buf, 4)?;
    let len = buf.get_i32();
    let len = usize::try_from(len).map_err(|_| Error::NegativeLength(len))?;
    let needed = len
        .checked_mul(element_size)
        .ok_or(Error::LargeLength(len))?;
    ensure_remaining(buf, needed)?;
    Ok(len)
}

pub(crate) fn write_snbt_string(f: &mut fmt::Formatter<'_>, string: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in string.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

fn write_joined<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write(f, item)?;
    }
    Ok(())
}

impl fmt::Display for NbtTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::End => Ok(()),
            Self::Byte(byte) => write!(f, "{byte}b"),
            Self::Short(short) => write!(f, "{short}s"),
            Self::Int(int) => write!(f, "{int}"),
            Self::Long(long) => write!(f, "{long}L"),
            Self::Float(float) => write!(f, "{float}f"),
            Self::Double(double) => write!(f, "{double}d"),
            Self::ByteArray(byte_array) => {
                f.write_str("[B;")?;
                write_joined(f, byte_array, |f, byte| write!(f, "{}b", *byte as i8))?;
                f.write_str("]")
            }
            Self::String(string) => write_snbt_string(f, string),
            Self::List(list) => {
                f.write_str("[")?;
                write_joined(f, list, |f, tag| write!(f, "{tag}"))?;
                f.write_str("]")
            }
            Self::Compound(compound) => write!(f, "{compound}"),
            Self::IntArray(int_array) => {
                f.write_str("[I;")?;
                write_joined(f, int_array, |f, int| write!(f, "{int}"))?;
                f.write_str("]")
            }
            Self::LongArray(long_array) => {
                f.write_str("[L;")?;
                write_joined(f, long_array, |f, long| write!(f, "{long}L"))?;
                f.write_str("]")
            }
        }
    }
}

impl From<i8> for NbtTag {
    fn from(value: i8) -> Self {
        Self::Byte(value)
    }
}

impl From<bool> for NbtTag {
    fn from(value: bool) -> Self {
        Self::Byte(i8::from(value))
    }
}

impl From<i16> for NbtTag {
    fn from(value: i16) -> Self {
        Self::Short(value)
    }
}

impl From<i32> for NbtTag {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for NbtTag {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for NbtTag {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for NbtTag {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<String> for NbtTag {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for NbtTag {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<NbtCompound> for NbtTag {
    fn from(value: NbtCompound) -> Self {
        Self::Compound(value)
    }
}

impl From<Vec<i32>> for NbtTag {
    fn from(value: Vec<i32>) -> Self {
        Self::IntArray(value)
    }
}
