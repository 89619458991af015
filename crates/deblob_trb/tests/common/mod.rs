//! Synthetic container builders shared by the integration tests.

use std::io::{Cursor, Write};

use binrw::{BinWrite, BinWriterExt, Endian};
use deblob_dds::{DdsHeader, DdsPixelFormat, FourCC, DDS_MAGIC};
use deblob_trb::texture::PtexRecord;
use deblob_trb::types::{DataInfo, TagInfo, TrbHeader};

/// Header with the fixed version and empty reserved span.
fn make_header(counts: (u32, u32), reloc: (u32, i32)) -> TrbHeader {
    TrbHeader {
        version: TrbHeader::VERSION,
        unknown: 0,
        flag1: 0,
        flag2: 0,
        data_info_count: counts.0,
        data_info_size: DataInfo::SIZE as u32,
        tag_count: counts.1,
        tag_size: TagInfo::SIZE as u32,
        relocation_data_offset: reloc.0,
        relocation_data_size: reloc.1,
        reserved: [0; 92],
    }
}

fn text_pool_info(offset: usize, size: usize) -> DataInfo {
    DataInfo {
        text_offset: 0,
        data_size: size as i32,
        data_size2: size as u32,
        data_offset: offset as u32,
        ..Default::default()
    }
}

fn raw_pool_info(offset: usize, size: usize) -> DataInfo {
    DataInfo {
        text_offset: 6,
        data_size: size as i32,
        data_size2: size as u32,
        data_offset: offset as u32,
        ..Default::default()
    }
}

/// Serialize header, section table and tag table, then append the pools.
fn assemble(
    endian: Endian,
    header: &TrbHeader,
    infos: &[DataInfo],
    tags: &[TagInfo],
    pools: &[&[u8]],
) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    cursor.write_type(header, endian).unwrap();
    for info in infos {
        cursor.write_type(info, endian).unwrap();
    }
    for tag in tags {
        cursor.write_type(tag, endian).unwrap();
    }

    let mut bytes = cursor.into_inner();
    for pool in pools {
        bytes.extend_from_slice(pool);
    }
    bytes
}

/// Two pools, one extension-less tag named `test` with a 10-byte payload,
/// and a 4-byte relocation block.
pub fn minimal_container(endian: Endian) -> Vec<u8> {
    let text_pool = b".text\0.data\0test\0";
    let raw_pool: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    let relocation = [0xDE, 0xAD, 0xBE, 0xEF];

    let text_base = TrbHeader::SIZE + 2 * DataInfo::SIZE + TagInfo::SIZE;
    let raw_base = text_base + text_pool.len();
    let reloc_base = raw_base + raw_pool.len();

    let header = make_header((2, 1), (reloc_base as u32, relocation.len() as i32));
    let infos = [
        text_pool_info(text_base, text_pool.len()),
        raw_pool_info(raw_base, raw_pool.len()),
    ];
    let tag = TagInfo {
        magic: TagInfo::NO_MAGIC,
        data_offset: 0,
        flag: 0,
        text_offset: 12,
    };

    assemble(
        endian,
        &header,
        &infos,
        &[tag],
        &[text_pool, &raw_pool, &relocation],
    )
}

/// Two pools, two extension-less tags `a` and `b` with the given payload
/// offsets into a 16-byte raw pool. Ascending offsets make a valid
/// container; descending offsets violate the tag ordering.
pub fn two_entry_container(endian: Endian, first_offset: i32, second_offset: i32) -> Vec<u8> {
    let text_pool = b".text\0.data\0a\0b\0";
    let raw_pool = [0x55u8; 16];

    let text_base = TrbHeader::SIZE + 2 * DataInfo::SIZE + 2 * TagInfo::SIZE;
    let raw_base = text_base + text_pool.len();
    let reloc_base = raw_base + raw_pool.len();

    let header = make_header((2, 2), (reloc_base as u32, 0));
    let infos = [
        text_pool_info(text_base, text_pool.len()),
        raw_pool_info(raw_base, raw_pool.len()),
    ];
    let tags = [
        TagInfo {
            magic: TagInfo::NO_MAGIC,
            data_offset: first_offset,
            flag: 0,
            text_offset: 12,
        },
        TagInfo {
            magic: TagInfo::NO_MAGIC,
            data_offset: second_offset,
            flag: 0,
            text_offset: 14,
        },
    ];

    assemble(endian, &header, &infos, &tags, &[text_pool, &raw_pool])
}

/// A minimal legacy DXT1 container: signature, header, four payload bytes.
pub fn dds_blob() -> Vec<u8> {
    let header = DdsHeader {
        size: DdsHeader::SIZE,
        flags: 0x0008_1007,
        height: 64,
        width: 64,
        pitch_or_linear_size: 2048,
        depth: 0,
        mipmap_count: 1,
        reserved1: [0; 11],
        pixel_format: DdsPixelFormat {
            size: DdsPixelFormat::SIZE,
            flags: DdsPixelFormat::FLAG_FOURCC,
            four_cc: FourCC::DXT1,
            rgb_bit_count: 0,
            r_bit_mask: 0,
            g_bit_mask: 0,
            b_bit_mask: 0,
            a_bit_mask: 0,
        },
        caps: 0x1000,
        caps2: 0,
        caps3: 0,
        caps4: 0,
        reserved2: 0,
    };

    let mut cursor = Cursor::new(Vec::new());
    cursor.write_all(DDS_MAGIC).unwrap();
    header.write(&mut cursor).unwrap();
    cursor.write_all(&[0xAA, 0xBB, 0xCC, 0xDD]).unwrap();
    cursor.into_inner()
}

/// Three pools: text, raw (one `PTEX` entry named `image`), and a trailing
/// pool holding [`dds_blob`], plus a 4-byte relocation block.
pub fn texture_container(endian: Endian) -> Vec<u8> {
    let blob = dds_blob();
    let text_pool = b".text\0.data\0image\0";
    let relocation = [0xCA, 0xFE, 0xF0, 0x0D];

    // PTEX payload: fixed 88-byte prefix, then the pointer record
    let record = PtexRecord {
        width: 64,
        height: 64,
        unknown: 0,
        blob_offset: 0,
        blob_size: blob.len() as i32,
    };
    let mut payload_cursor = Cursor::new(vec![0u8; PtexRecord::OFFSET]);
    payload_cursor.set_position(PtexRecord::OFFSET as u64);
    payload_cursor.write_type(&record, endian).unwrap();
    let raw_pool = payload_cursor.into_inner();

    let text_base = TrbHeader::SIZE + 3 * DataInfo::SIZE + TagInfo::SIZE;
    let raw_base = text_base + text_pool.len();
    let trailing_base = raw_base + raw_pool.len();
    let reloc_base = trailing_base + blob.len();

    let header = make_header((3, 1), (reloc_base as u32, relocation.len() as i32));
    let infos = [
        text_pool_info(text_base, text_pool.len()),
        raw_pool_info(raw_base, raw_pool.len()),
        DataInfo {
            text_offset: 0,
            data_size: blob.len() as i32,
            data_size2: blob.len() as u32,
            data_offset: trailing_base as u32,
            ..Default::default()
        },
    ];
    let tag = TagInfo {
        magic: TagInfo::TEXTURE,
        data_offset: 0,
        flag: 0,
        text_offset: 12,
    };

    assemble(
        endian,
        &header,
        &infos,
        &[tag],
        &[text_pool, &raw_pool, &blob, &relocation],
    )
}

/// Two pools with a single leading `enti` tag named `level` whose payload is
/// an 8-byte property table header.
pub fn entity_container(endian: Endian) -> Vec<u8> {
    let text_pool = b".text\0.data\0level\0";

    let mut raw_cursor = Cursor::new(Vec::new());
    raw_cursor.write_type(&0x20i32, endian).unwrap(); // property array offset
    raw_cursor.write_type(&5i32, endian).unwrap(); // property count
    let raw_pool = raw_cursor.into_inner();

    let text_base = TrbHeader::SIZE + 2 * DataInfo::SIZE + TagInfo::SIZE;
    let raw_base = text_base + text_pool.len();
    let reloc_base = raw_base + raw_pool.len();

    let header = make_header((2, 1), (reloc_base as u32, 0));
    let infos = [
        text_pool_info(text_base, text_pool.len()),
        raw_pool_info(raw_base, raw_pool.len()),
    ];
    let tag = TagInfo {
        magic: TagInfo::ENTITY,
        data_offset: 0,
        flag: 0,
        text_offset: 12,
    };

    assemble(endian, &header, &infos, &[tag], &[text_pool, &raw_pool])
}
