use std::fmt;

use bytes::{Buf, BufMut};
use uuid::Uuid;

use crate::{
    END_ID, Error, MAX_DEPTH, ensure_remaining, get_nbt_string, put_nbt_string,
    tag::{NbtTag, write_snbt_string},
};

/// An ordered set of named tags. Order is kept so the same compound always
/// encodes to the same bytes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NbtCompound {
    pub child_tags: Vec<(String, NbtTag)>,
}

impl NbtCompound {
    pub fn new() -> Self {
        Self {
            child_tags: Vec::new(),
        }
    }

    pub fn deserialize_content(buf: &mut impl Buf, depth: usize) -> Result<Self, Error> {
        if depth > MAX_DEPTH {
            return Err(Error::DepthLimit);
        }
        let mut compound = Self::new();
        loop {
            ensure_remaining(buf, 1)?;
            let tag_id = buf.get_u8();
            if tag_id == END_ID {
                break;
            }
            let name = get_nbt_string(buf)?;
            let tag = NbtTag::deserialize_data(buf, tag_id, depth)?;
            compound.put(&name, tag);
        }
        Ok(compound)
    }

    pub fn serialize_content(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        for (name, tag) in &self.child_tags {
            buf.put_u8(tag.get_type_id());
            put_nbt_string(buf, name)?;
            tag.serialize_data(buf)?;
        }
        buf.put_u8(END_ID);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.child_tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.child_tags.len()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.child_tags.iter().any(|(key, _)| key == name)
    }

    pub fn get(&self, name: &str) -> Option<&NbtTag> {
        self.child_tags
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, tag)| tag)
    }

    pub fn remove(&mut self, name: &str) -> Option<NbtTag> {
        let index = self.child_tags.iter().position(|(key, _)| key == name)?;
        Some(self.child_tags.remove(index).1)
    }

    /// Inserts `value`, replacing an existing tag of the same name in place.
    pub fn put(&mut self, name: &str, value: impl Into<NbtTag>) {
        let value = value.into();
        match self.child_tags.iter_mut().find(|(key, _)| key == name) {
            Some((_, tag)) => *tag = value,
            None => self.child_tags.push((name.to_string(), value)),
        }
    }

    pub fn put_byte(&mut self, name: &str, value: i8) {
        self.put(name, value);
    }

    pub fn put_bool(&mut self, name: &str, value: bool) {
        self.put(name, value);
    }

    pub fn put_short(&mut self, name: &str, value: i16) {
        self.put(name, value);
    }

    pub fn put_int(&mut self, name: &str, value: i32) {
        self.put(name, value);
    }

    pub fn put_long(&mut self, name: &str, value: i64) {
        self.put(name, value);
    }

    pub fn put_float(&mut self, name: &str, value: f32) {
        self.put(name, value);
    }

    pub fn put_double(&mut self, name: &str, value: f64) {
        self.put(name, value);
    }

    pub fn put_string(&mut self, name: &str, value: String) {
        self.put(name, value);
    }

    pub fn put_component(&mut self, name: &str, value: NbtCompound) {
        self.put(name, value);
    }

    pub fn put_list(&mut self, name: &str, value: Vec<NbtTag>) {
        self.put(name, NbtTag::List(value));
    }

    pub fn put_int_array(&mut self, name: &str, value: Vec<i32>) {
        self.put(name, value);
    }

    /// Stores a UUID as four ints, most significant first.
    pub fn put_uuid(&mut self, name: &str, uuid: &Uuid) {
        let value = uuid.as_u128();
        self.put_int_array(
            name,
            vec![
                (value >> 96) as i32,
                (value >> 64) as i32,
                (value >> 32) as i32,
                value as i32,
            ],
        );
    }

    pub fn get_byte(&self, name: &str) -> Option<i8> {
        self.get(name).and_then(NbtTag::extract_byte)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(NbtTag::extract_bool)
    }

    pub fn get_short(&self, name: &str) -> Option<i16> {
        self.get(name).and_then(NbtTag::extract_short)
    }

    pub fn get_int(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(NbtTag::extract_int)
    }

    pub fn get_long(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(NbtTag::extract_long)
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(NbtTag::extract_float)
    }

    pub fn get_double(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(NbtTag::extract_double)
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(NbtTag::extract_string)
    }

    pub fn get_list(&self, name: &str) -> Option<&[NbtTag]> {
        self.get(name).and_then(NbtTag::extract_list)
    }

    pub fn get_compound(&self, name: &str) -> Option<&NbtCompound> {
        self.get(name).and_then(NbtTag::extract_compound)
    }

    pub fn get_int_array(&self, name: &str) -> Option<&[i32]> {
        self.get(name).and_then(NbtTag::extract_int_array)
    }

    pub fn get_long_array(&self, name: &str) -> Option<&[i64]> {
        self.get(name).and_then(NbtTag::extract_long_array)
    }

    /// Reads a UUID stored either as four ints or in the pre-1.16 `{M, L}` form.
    pub fn get_uuid(&self, name: &str) -> Option<Uuid> {
        match self.get(name)? {
            NbtTag::IntArray(ints) if ints.len() == 4 => {
                let value = ints
                    .iter()
                    .fold(0u128, |acc, int| (acc << 32) | u128::from(*int as u32));
                Some(Uuid::from_u128(value))
            }
            NbtTag::Compound(legacy) => {
                let most = legacy.get_long("M")?;
                let least = legacy.get_long("L")?;
                Some(Uuid::from_u64_pair(most as u64, least as u64))
            }
            _ => None,
        }
    }
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
}

impl fmt::Display for NbtCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, tag)) in self.child_tags.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if is_plain_key(key) {
                f.write_str(key)?;
            } else {
                write_snbt_string(f, key)?;
            }
            write!(f, ":{tag}")?;
        }
        f.write_str("}")
    }
}

impl From<Vec<(String, NbtTag)>> for NbtCompound {
    fn from(child_tags: Vec<(String, NbtTag)>) -> Self {
        Self { child_tags }
    }
}
