//! Model mesh sections embedded in `PMDL` entries.
//!
//! The section header is a run of fields separated by skipped spans; every
//! position is cumulative relative-offset arithmetic from the entry base, so
//! the field widths below must not change independently of each other.

use std::io::Cursor;

use binrw::{BinRead, BinReaderExt, Endian};

use crate::error::{Error, Result};
use crate::types::DataInfo;

/// Fixed-layout header at the start of a `PMDL` entry payload.
#[derive(BinRead, Debug, Copy, Clone, PartialEq)]
pub struct PmdlHeader {
    /// Number of relocations touching this section
    #[br(pad_before = 8)]
    pub relocation_count: i16,

    /// Declared size of the section
    pub size: i16,

    /// Offset of the model name, relative to the text pool
    #[br(pad_before = 4)]
    pub text_offset: i32,

    /// Total vertex count over all submeshes
    #[br(pad_before = 36)]
    pub vertex_count: i32,

    /// Total face count over all submeshes
    pub face_count: i32,

    /// Start of the face streams, relative to the raw payload pool
    pub face_start_offset: i32,

    /// Start of the vertex streams, relative to the raw payload pool
    pub vertex_start_offset: i32,

    /// Secondary face data offset, relative to the raw payload pool
    #[br(pad_before = 4)]
    pub face_data_offset: i32,

    /// Secondary face data size
    pub face_data_size: i32,

    /// Number of submesh descriptors
    #[br(pad_before = 48)]
    pub sub_info_count: i32,

    /// Start of the submesh descriptor offset array, relative to the raw
    /// payload pool
    pub sub_infos_start_offset: i32,

    /// End of the submesh descriptor table, relative to the raw payload pool
    pub sub_infos_end_offset: i32,
}

/// Per-submesh descriptor.
///
/// Stream offsets are relative to the raw payload pool. Twenty 32-bit fields
/// on disk; the trailing fifteen have not been identified.
#[derive(BinRead, Debug, Copy, Clone, PartialEq)]
pub struct SubInfoData {
    /// Vertices in this submesh
    pub vertex_count: i32,

    /// Faces in this submesh
    pub face_count: i32,

    /// Start of the vertex stream
    pub vertex_offset: i32,

    /// Start of the normal/UV stream
    pub normal_offset: i32,

    /// Start of the face stream
    pub face_offset: i32,

    /// Unidentified remainder of the record
    pub unknown: [i32; 15],
}

impl SubInfoData {
    /// On-disk size of one descriptor.
    pub const SIZE: usize = 80;
}

/// A decoded `PMDL` mesh section.
#[derive(Debug, Clone, PartialEq)]
pub struct PmdlModel {
    /// Section header
    pub header: PmdlHeader,

    /// Submesh descriptors, in descriptor-table order
    pub sub_infos: Vec<SubInfoData>,

    /// Byte size of each submesh's normal/UV block, derived from the offset
    /// delta to the next descriptor; `None` for the final submesh
    pub uv_block_sizes: Vec<Option<i32>>,

    /// Positions of the final submesh's vertex stream
    pub positions: Vec<[f32; 3]>,
}

fn unsupported(reason: impl Into<String>) -> Error {
    Error::UnsupportedSubResource {
        magic: "PMDL",
        reason: reason.into(),
    }
}

/// Decode the mesh section of a `PMDL` entry, pulling its descriptor table
/// and the final submesh's vertex stream out of the raw payload pool.
pub(crate) fn decode(
    file: &[u8],
    raw_pool: &DataInfo,
    payload: &[u8],
    endian: Endian,
) -> Result<PmdlModel> {
    let mut reader = Cursor::new(payload);
    let header: PmdlHeader = reader
        .read_type(endian)
        .map_err(|e| unsupported(e.to_string()))?;

    if header.sub_info_count < 0 {
        return Err(unsupported(format!(
            "negative submesh count {}",
            header.sub_info_count
        )));
    }
    let count = header.sub_info_count as usize;

    // Offset array first, then one descriptor per start offset.
    let starts_bytes = raw_pool
        .slice(
            file,
            "raw",
            i64::from(header.sub_infos_start_offset),
            count * 4,
        )
        .map_err(|e| unsupported(e.to_string()))?;
    let mut starts_reader = Cursor::new(starts_bytes);

    let mut sub_infos = Vec::with_capacity(count);
    let mut previous_start = None;
    for index in 0..count {
        let start: i32 = starts_reader
            .read_type(endian)
            .map_err(|e| unsupported(e.to_string()))?;

        if previous_start.is_some_and(|p| start < p) {
            return Err(unsupported(format!(
                "descriptor {index} starts at {start}, before its predecessor"
            )));
        }
        previous_start = Some(start);

        let record_bytes = raw_pool
            .slice(file, "raw", i64::from(start), SubInfoData::SIZE)
            .map_err(|e| unsupported(e.to_string()))?;
        let sub_info: SubInfoData = Cursor::new(record_bytes)
            .read_type(endian)
            .map_err(|e| unsupported(e.to_string()))?;
        sub_infos.push(sub_info);
    }

    let uv_block_sizes = uv_block_sizes(&sub_infos)?;
    let positions = match sub_infos.last() {
        Some(last) => read_positions(file, raw_pool, last, endian)?,
        None => Vec::new(),
    };

    Ok(PmdlModel {
        header,
        sub_infos,
        uv_block_sizes,
        positions,
    })
}

/// Derive each submesh's normal/UV block size from the offset delta to the
/// next descriptor. The final submesh has no successor to bound it.
fn uv_block_sizes(sub_infos: &[SubInfoData]) -> Result<Vec<Option<i32>>> {
    sub_infos
        .iter()
        .enumerate()
        .map(|(index, sub_info)| match sub_infos.get(index + 1) {
            Some(next) => {
                let delta = next.normal_offset - sub_info.normal_offset;
                if delta < 0 {
                    Err(unsupported(format!(
                        "descriptor {} normal offset below its predecessor",
                        index + 1
                    )))
                } else {
                    Ok(Some(delta))
                }
            }
            None => Ok(None),
        })
        .collect()
}

/// Decode the vertex stream of a submesh as packed position triples.
fn read_positions(
    file: &[u8],
    raw_pool: &DataInfo,
    sub_info: &SubInfoData,
    endian: Endian,
) -> Result<Vec<[f32; 3]>> {
    if sub_info.vertex_count < 0 {
        return Err(unsupported(format!(
            "negative vertex count {}",
            sub_info.vertex_count
        )));
    }
    let count = sub_info.vertex_count as usize;

    let stream = raw_pool
        .slice(file, "raw", i64::from(sub_info.vertex_offset), count * 12)
        .map_err(|e| unsupported(e.to_string()))?;
    let mut reader = Cursor::new(stream);

    (0..count)
        .map(|_| {
            reader
                .read_type::<[f32; 3]>(endian)
                .map_err(|e| unsupported(e.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::model::PmdlHeader;

    #[test]
    fn read_header_layout() -> Result<()> {
        // Header walk: 8 skipped, counts, 4 skipped, text offset, 36 skipped,
        // summary fields, 4 skipped, face fields, 48 skipped, descriptor span.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0u8; 8]);
        bytes.extend_from_slice(&3i16.to_le_bytes()); // relocation count
        bytes.extend_from_slice(&144i16.to_le_bytes()); // size
        bytes.extend_from_slice(&[0u8; 4]);
        bytes.extend_from_slice(&12i32.to_le_bytes()); // text offset
        bytes.extend_from_slice(&[0u8; 36]);
        bytes.extend_from_slice(&8i32.to_le_bytes()); // vertex count
        bytes.extend_from_slice(&4i32.to_le_bytes()); // face count
        bytes.extend_from_slice(&0x200i32.to_le_bytes()); // face start
        bytes.extend_from_slice(&0x100i32.to_le_bytes()); // vertex start
        bytes.extend_from_slice(&[0u8; 4]);
        bytes.extend_from_slice(&0x240i32.to_le_bytes()); // face data offset
        bytes.extend_from_slice(&0x40i32.to_le_bytes()); // face data size
        bytes.extend_from_slice(&[0u8; 48]);
        bytes.extend_from_slice(&2i32.to_le_bytes()); // sub info count
        bytes.extend_from_slice(&0x300i32.to_le_bytes()); // sub infos start
        bytes.extend_from_slice(&0x3A8i32.to_le_bytes()); // sub infos end

        let header = PmdlHeader::read_le(&mut Cursor::new(&bytes))?;
        assert_eq!(header.relocation_count, 3);
        assert_eq!(header.size, 144);
        assert_eq!(header.text_offset, 12);
        assert_eq!(header.vertex_count, 8);
        assert_eq!(header.face_count, 4);
        assert_eq!(header.face_start_offset, 0x200);
        assert_eq!(header.vertex_start_offset, 0x100);
        assert_eq!(header.face_data_offset, 0x240);
        assert_eq!(header.face_data_size, 0x40);
        assert_eq!(header.sub_info_count, 2);
        assert_eq!(header.sub_infos_start_offset, 0x300);
        assert_eq!(header.sub_infos_end_offset, 0x3A8);

        Ok(())
    }
}
