//! Base types for the structure of a DDS container.

use binrw::{BinRead, BinWrite};

/// Four-character code identifying the compression of the pixel payload.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// No compression, layout given by the bit masks.
    pub const NONE: Self = Self([0; 4]);
    /// BC1 block compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// BC2 block compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// BC3 block compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// BC4 unsigned block compression.
    pub const BC4U: Self = Self(*b"BC4U");
    /// BC4 signed block compression.
    pub const BC4S: Self = Self(*b"BC4S");
    /// BC5 unsigned block compression.
    pub const BC5U: Self = Self(*b"BC5U");
    /// BC5 signed block compression.
    pub const BC5S: Self = Self(*b"BC5S");
    /// Extended header follows; actual format is in [`DdsHeaderDx10`].
    pub const DX10: Self = Self(*b"DX10");
}

/// Pixel format sub-record of the container header.
///
/// Always 32 bytes on disk, starting with its own size field.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct DdsPixelFormat {
    /// Structure size, fixed at 32
    pub size: u32,
    /// Pixel format flags
    pub flags: u32,
    /// Compression code, zero for plain bit-mask formats
    pub four_cc: FourCC,
    /// Bits per pixel for uncompressed formats
    pub rgb_bit_count: u32,
    /// Red channel mask
    pub r_bit_mask: u32,
    /// Green channel mask
    pub g_bit_mask: u32,
    /// Blue channel mask
    pub b_bit_mask: u32,
    /// Alpha channel mask
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// On-disk size of the sub-record
    pub const SIZE: u32 = 32;

    /// Flag bit marking `four_cc` as meaningful
    pub const FLAG_FOURCC: u32 = 0x4;
}

/// Fixed container header following the `"DDS "` signature.
///
/// All fields are little-endian regardless of the byte order of any
/// surrounding archive.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct DdsHeader {
    /// Header size, fixed at 124
    pub size: u32,
    /// Header flags
    pub flags: u32,
    /// Image height in pixels
    pub height: u32,
    /// Image width in pixels
    pub width: u32,
    /// Pitch for uncompressed images, total top-level size for compressed
    pub pitch_or_linear_size: u32,
    /// Depth for volume textures
    pub depth: u32,
    /// Number of mipmap levels
    pub mipmap_count: u32,
    /// Reserved
    pub reserved1: [u32; 11],
    /// Pixel format sub-record
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities
    pub caps: u32,
    /// Surface capabilities 2
    pub caps2: u32,
    /// Surface capabilities 3
    pub caps3: u32,
    /// Surface capabilities 4
    pub caps4: u32,
    /// Reserved
    pub reserved2: u32,
}

impl DdsHeader {
    /// On-disk size of the header, excluding the 4-byte signature
    pub const SIZE: u32 = 124;

    /// Whether an extended header record follows this one
    pub fn is_extended(&self) -> bool {
        self.pixel_format.four_cc == FourCC::DX10
    }
}

/// Extended (DX10) header record, present only when the pixel format
/// four-character code is `"DX10"`.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct DdsHeaderDx10 {
    /// DXGI format number
    pub dxgi_format: u32,
    /// Resource dimension
    pub resource_dimension: u32,
    /// Misc flags
    pub misc_flag: u32,
    /// Array size
    pub array_size: u32,
    /// Misc flags 2
    pub misc_flags2: u32,
}

impl DdsHeaderDx10 {
    /// On-disk size of the extended record
    pub const SIZE: u32 = 20;

    /// DXGI_FORMAT_BC1_UNORM
    pub const BC1_UNORM: u32 = 71;
    /// DXGI_FORMAT_BC1_UNORM_SRGB
    pub const BC1_UNORM_SRGB: u32 = 72;
    /// DXGI_FORMAT_BC2_UNORM
    pub const BC2_UNORM: u32 = 74;
    /// DXGI_FORMAT_BC2_UNORM_SRGB
    pub const BC2_UNORM_SRGB: u32 = 75;
    /// DXGI_FORMAT_BC3_UNORM
    pub const BC3_UNORM: u32 = 77;
    /// DXGI_FORMAT_BC3_UNORM_SRGB
    pub const BC3_UNORM_SRGB: u32 = 78;
    /// DXGI_FORMAT_BC4_UNORM
    pub const BC4_UNORM: u32 = 80;
    /// DXGI_FORMAT_BC4_SNORM
    pub const BC4_SNORM: u32 = 81;
    /// DXGI_FORMAT_BC5_UNORM
    pub const BC5_UNORM: u32 = 83;
    /// DXGI_FORMAT_BC5_SNORM
    pub const BC5_SNORM: u32 = 84;
}
