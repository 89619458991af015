//! Fixture builders shared by the unit tests.

use std::io::{Cursor, Write};

use binrw::BinWrite;

use crate::types::{DdsHeader, DdsHeaderDx10, DdsPixelFormat, FourCC};
use crate::DDS_MAGIC;

/// 64x64 single-mip header with the given pixel format.
fn header(four_cc: FourCC) -> DdsHeader {
    DdsHeader {
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
            four_cc,
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
    }
}

/// A complete legacy DXT1 container around `pixels`.
pub fn dxt1_container(pixels: &[u8]) -> Vec<u8> {
    let mut writer = Cursor::new(Vec::new());
    writer.write_all(DDS_MAGIC).unwrap();
    header(FourCC::DXT1).write(&mut writer).unwrap();
    writer.write_all(pixels).unwrap();
    writer.into_inner()
}

/// A complete extended-form container with the given DXGI format.
pub fn dx10_container(dxgi_format: u32, pixels: &[u8]) -> Vec<u8> {
    let mut writer = Cursor::new(Vec::new());
    writer.write_all(DDS_MAGIC).unwrap();
    header(FourCC::DX10).write(&mut writer).unwrap();
    DdsHeaderDx10 {
        dxgi_format,
        resource_dimension: 3,
        misc_flag: 0,
        array_size: 1,
        misc_flags2: 0,
    }
    .write(&mut writer)
    .unwrap();
    writer.write_all(pixels).unwrap();
    writer.into_inner()
}
