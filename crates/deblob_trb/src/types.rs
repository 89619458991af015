//! Base types for the structure of a TRB archive.

use binrw::{BinRead, BinWrite};

use crate::error::{Error, LayoutInvariantError, Result};

/// TRB file header
///
/// Starts with the 3-byte `"TRB"` signature. The version field doubles as the
/// byte-order probe: read little-endian it holds 2001 in little-endian files
/// and a byte-swapped value otherwise (see [`crate::read::TrbArchive`]).
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(magic = b"TRB")]
pub struct TrbHeader {
    /// Format version, fixed at 2001
    pub version: u32,

    /// Unknown, skipped by the original tooling
    pub unknown: u32,

    /// First header flag
    pub flag1: u16,

    /// Second header flag
    pub flag2: u16,

    /// Number of [`DataInfo`] records following the header
    pub data_info_count: u32,

    /// Declared byte size of one [`DataInfo`] record
    pub data_info_size: u32,

    /// Number of [`TagInfo`] records following the section table
    pub tag_count: u32,

    /// Declared byte size of one [`TagInfo`] record
    pub tag_size: u32,

    /// Absolute offset of the relocation block
    pub relocation_data_offset: u32,

    /// Byte size of the relocation block
    pub relocation_data_size: i32,

    /// Reserved span, carried verbatim
    pub reserved: [u8; 92],
}

impl TrbHeader {
    /// Signature bytes at the start of every archive.
    pub const MAGIC: &'static [u8; 3] = b"TRB";

    /// Expected version value; any other value read little-endian marks the
    /// file as big-endian.
    pub const VERSION: u32 = 2001;

    /// On-disk size of the header, signature included.
    pub const SIZE: usize = 131;
}

/// Describes one logical memory section ("pool") of the archive
///
/// Section 0 is the text/name pool, section 1 the raw payload pool, section 2
/// an optional extra pool, and the final section holds sub-resource blobs.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, Default, PartialEq)]
pub struct DataInfo {
    /// Unknown
    pub unknown1: u32,

    /// Offset of this section's label within the text pool
    pub text_offset: u32,

    /// Unknown
    pub unknown2: u32,

    /// Unknown
    pub unknown3: u32,

    /// Byte size of the section
    pub data_size: i32,

    /// Secondary size, purpose unknown
    pub data_size2: u32,

    /// Absolute offset of the section
    pub data_offset: u32,

    /// Unknown
    pub unknown4: u32,

    /// Reserved, observed zero
    pub zero1: u32,

    /// Reserved, observed zero
    pub zero2: u32,

    /// Reserved, observed zero
    pub zero3: u32,

    /// Reserved, observed zero
    pub zero4: u32,
}

impl DataInfo {
    /// On-disk size of one record.
    pub const SIZE: usize = 48;

    /// Whether the four reserved fields hold their expected zero values.
    pub fn reserved_zeroed(&self) -> bool {
        self.zero1 == 0 && self.zero2 == 0 && self.zero3 == 0 && self.zero4 == 0
    }

    /// Slice `len` bytes out of `file` at `rel` bytes into this section.
    ///
    /// `pool` names the section in errors. Offsets before the section start
    /// and slices past the end of the buffer are rejected.
    pub(crate) fn slice<'a>(
        &self,
        file: &'a [u8],
        pool: &'static str,
        rel: i64,
        len: usize,
    ) -> Result<&'a [u8]> {
        if rel < 0 {
            return Err(LayoutInvariantError::OffsetBeforePool { pool, offset: rel }.into());
        }

        let start = self.data_offset as usize + rel as usize;
        let end = start + len;
        if end > file.len() {
            return Err(Error::Truncated {
                declared: end,
                available: file.len(),
            });
        }

        Ok(&file[start..end])
    }
}

/// Describes one file stored in the archive
///
/// Tags are stored in ascending `data_offset` order; an entry's byte length
/// is the delta to the next tag's offset, and the final entry runs to the end
/// of the raw payload pool.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, Default, PartialEq)]
pub struct TagInfo {
    /// 4-byte ASCII sub-format code, all zero for "no extension"
    pub magic: [u8; 4],

    /// Offset of the entry payload, relative to the raw payload pool
    pub data_offset: i32,

    /// Per-entry flag, purpose unknown
    pub flag: u32,

    /// Offset of the entry name, relative to the text pool
    pub text_offset: i32,
}

impl TagInfo {
    /// On-disk size of one record.
    pub const SIZE: usize = 16;

    /// Magic marking an entry without an extension.
    pub const NO_MAGIC: [u8; 4] = [0; 4];

    /// Magic of entries carrying an embedded texture pointer.
    pub const TEXTURE: [u8; 4] = *b"PTEX";

    /// Magic of entries carrying a model mesh section.
    pub const MODEL: [u8; 4] = *b"PMDL";

    /// Magic of the entity/property table entry.
    pub const ENTITY: [u8; 4] = *b"enti";

    /// File extension derived from the magic, lower-cased; `None` when the
    /// magic is all zero.
    pub fn extension(&self) -> Option<String> {
        Self::extension_of(self.magic)
    }

    /// Extension for an arbitrary magic, emitted verbatim except for
    /// lower-casing.
    pub fn extension_of(magic: [u8; 4]) -> Option<String> {
        (magic != Self::NO_MAGIC).then(|| String::from_utf8_lossy(&magic).to_lowercase())
    }
}
