//! Entity/property tables stored in the leading `enti` entry.
//!
//! Only the table header is decoded. Each property carries a [`VariableType`]
//! tag, but the on-disk encoding of the value union behind it has not been
//! reverse-engineered (the vector and offset payload widths are unknown), so
//! property decoding stops at the header.

use std::io::Cursor;

use binrw::{BinRead, BinReaderExt, Endian};

use crate::error::{Error, Result};

/// Header of the entity/property table at the base of an `enti` entry.
#[derive(BinRead, Debug, Copy, Clone, PartialEq)]
pub struct EntityHeader {
    /// Offset of the property array, relative to the raw payload pool
    pub property_array_offset: i32,

    /// Number of properties in the array
    pub property_count: i32,
}

impl EntityHeader {
    /// On-disk size of the header.
    pub const SIZE: usize = 8;

    /// Read the table header out of an `enti` entry payload.
    pub fn parse(payload: &[u8], endian: Endian) -> Result<EntityHeader> {
        if payload.len() < Self::SIZE {
            return Err(Error::UnsupportedSubResource {
                magic: "enti",
                reason: format!(
                    "payload of {} bytes cannot hold the {}-byte table header",
                    payload.len(),
                    Self::SIZE
                ),
            });
        }

        let mut reader = Cursor::new(payload);
        Ok(reader.read_type(endian)?)
    }
}

/// Known property value type tags.
///
/// Declared for completeness; values of these types are not decoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VariableType {
    /// Enumerated value
    Enum,
    /// Signed integer
    Integer,
    /// 32-bit float
    Float,
    /// Boolean
    Bool,
    /// Offset of a string in the text pool
    Text,
    /// Four-component vector
    Vector4,
    /// Offset into the raw payload pool
    Offset,
}
