//! # DDS Container Documentation
//!
//! This crate provides utilities to decode and re-encode the **DDS** texture
//! containers that *de Blob 2* embeds inside its TRB archives. The archive
//! codec treats this crate as an opaque encode/decode service: it hands over
//! an extracted byte blob and gets back a decoded texture exposing the fixed
//! header fields and the raw pixel payload.
//!
//! ## File Structure
//!
//! A DDS container is a 4-byte signature, a 124-byte header, an optional
//! 20-byte extension record, and the pixel payload.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: `"DDS "`                                          |
//! | 0x0004         | Header Size            | 4 bytes: Fixed value 124                                   |
//! | 0x0008         | Flags                  | 4 bytes: Which header fields carry meaning                 |
//! | 0x000C         | Height                 | 4 bytes: Image height in pixels                            |
//! | 0x0010         | Width                  | 4 bytes: Image width in pixels                             |
//! | 0x0014         | Pitch or Linear Size   | 4 bytes: Row pitch or top-level compressed size            |
//! | 0x0018         | Depth                  | 4 bytes: Depth for volume textures                         |
//! | 0x001C         | Mipmap Count           | 4 bytes: Number of mipmap levels                           |
//! | 0x0020         | Reserved               | 44 bytes: Eleven reserved words                            |
//! | 0x004C         | Pixel Format           | 32 bytes: Sub-record, see below                            |
//! | 0x006C         | Caps 1-4               | 16 bytes: Surface capability bits                          |
//! | 0x007C         | Reserved               | 4 bytes                                                    |
//!
//! ### Pixel Format Sub-Record
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Size                   | 4 bytes: Fixed value 32                                    |
//! | 0x0004         | Flags                  | 4 bytes: 0x4 marks the four-character code as meaningful   |
//! | 0x0008         | FourCC                 | 4 bytes: Compression code (`DXT1`, `DXT5`, `DX10`, ...)    |
//! | 0x000C         | RGB Bit Count          | 4 bytes: Bits per pixel for uncompressed formats           |
//! | 0x0010         | Bit Masks              | 16 bytes: Red, green, blue, alpha channel masks            |
//!
//! When the four-character code is `"DX10"` a 20-byte extension record
//! follows the header, carrying the DXGI format number. Reading handles both
//! forms; writing always emits the legacy form, folding known DXGI formats
//! back into their legacy codes (see [`DdsTexture::to_legacy_bytes`]).
//!
//! ## Additional Information
//!
//! - **File Extension**: `.dds`
//! - **Endianness**: Little-endian for all multi-byte integers, regardless of
//!   the byte order of any archive the container is embedded in
//!

pub mod error;
pub mod read;
pub mod types;
pub mod write;

#[cfg(test)]
pub(crate) mod tests_support;

pub use error::{Error, Result};
pub use read::DdsTexture;
pub use types::{DdsHeader, DdsHeaderDx10, DdsPixelFormat, FourCC};

/// Container signature bytes.
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
