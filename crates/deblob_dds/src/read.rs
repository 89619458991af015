//! Types for decoding DDS texture containers
//!

use std::io::Cursor;

use binrw::BinRead;
use tracing::instrument;

use crate::error::{Error, Result};
use crate::types::{DdsHeader, DdsHeaderDx10, FourCC};
use crate::DDS_MAGIC;

/// A decoded DDS texture container.
///
/// Holds the fixed header, the extended header when the source carried one,
/// and the raw pixel payload. The texture is normalized to a single in-memory
/// representation on read; [`DdsTexture::to_legacy_bytes`] always re-emits the
/// legacy header form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsTexture {
    /// Fixed container header
    pub header: DdsHeader,
    /// Extended header, present when the source was written in DX10 form
    pub dx10: Option<DdsHeaderDx10>,
    /// Raw pixel payload, everything after the declared headers
    pub data: Vec<u8>,
}

impl DdsTexture {
    /// Whether the buffer starts with the `"DDS "` signature.
    pub fn identify(bytes: &[u8]) -> bool {
        bytes.starts_with(DDS_MAGIC)
    }

    /// Decode a DDS container from an in-memory buffer.
    #[instrument(skip(bytes), err)]
    pub fn new(bytes: &[u8]) -> Result<DdsTexture> {
        if !Self::identify(bytes) {
            return Err(Error::InvalidSignature);
        }

        let fixed = DDS_MAGIC.len() + DdsHeader::SIZE as usize;
        if bytes.len() < fixed {
            return Err(Error::Truncated {
                declared: fixed,
                available: bytes.len(),
            });
        }

        let mut reader = Cursor::new(&bytes[DDS_MAGIC.len()..]);
        let header = DdsHeader::read(&mut reader)?;

        let dx10 = if header.is_extended() {
            let declared = fixed + DdsHeaderDx10::SIZE as usize;
            if bytes.len() < declared {
                return Err(Error::Truncated {
                    declared,
                    available: bytes.len(),
                });
            }
            Some(DdsHeaderDx10::read(&mut reader)?)
        } else {
            None
        };

        let data_start = DDS_MAGIC.len() + reader.position() as usize;
        Ok(DdsTexture {
            header,
            dx10,
            data: bytes[data_start..].to_vec(),
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.header.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// Four-character code of the pixel format as stored.
    pub fn four_cc(&self) -> FourCC {
        self.header.pixel_format.four_cc
    }

    /// Raw pixel payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::read::DdsTexture;
    use crate::tests_support::{dx10_container, dxt1_container};
    use crate::types::{DdsHeaderDx10, FourCC};

    #[test]
    fn read_invalid_signature() {
        let result = DdsTexture::new(b"BMP whatever");
        assert!(matches!(result, Err(Error::InvalidSignature)));
    }

    #[test]
    fn read_truncated_header() {
        let bytes = dxt1_container(&[0xAA; 8]);
        let result = DdsTexture::new(&bytes[..100]);
        assert!(matches!(result, Err(Error::Truncated { .. })));
    }

    #[test]
    fn read_legacy_container() -> Result<()> {
        let bytes = dxt1_container(&[0xAA; 8]);
        let texture = DdsTexture::new(&bytes)?;

        assert_eq!(texture.width(), 64);
        assert_eq!(texture.height(), 64);
        assert_eq!(texture.four_cc(), FourCC::DXT1);
        assert_eq!(texture.dx10, None);
        assert_eq!(texture.data(), &[0xAA; 8]);

        Ok(())
    }

    #[test]
    fn read_extended_container() -> Result<()> {
        let bytes = dx10_container(DdsHeaderDx10::BC3_UNORM, &[0xBB; 16]);
        let texture = DdsTexture::new(&bytes)?;

        assert_eq!(texture.four_cc(), FourCC::DX10);
        assert_eq!(
            texture.dx10.map(|d| d.dxgi_format),
            Some(DdsHeaderDx10::BC3_UNORM)
        );
        assert_eq!(texture.data(), &[0xBB; 16]);

        Ok(())
    }
}
