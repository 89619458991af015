//! Types for re-encoding DDS texture containers
//!

use std::io::{Cursor, Write};

use binrw::BinWrite;
use tracing::{instrument, warn};

use crate::error::Result;
use crate::read::DdsTexture;
use crate::types::{DdsHeaderDx10, DdsPixelFormat, FourCC};
use crate::DDS_MAGIC;

impl DdsTexture {
    /// Pick the legacy four-character code for this texture.
    ///
    /// Sources written in extended form carry `"DX10"` plus a DXGI format
    /// number; the legacy header has no room for the extension record, so the
    /// DXGI number is folded back into the equivalent legacy code.
    pub fn legacy_four_cc(&self) -> FourCC {
        if self.header.pixel_format.four_cc != FourCC::DX10 {
            return self.header.pixel_format.four_cc;
        }

        let dxgi = self.dx10.map(|d| d.dxgi_format).unwrap_or_default();
        match dxgi {
            DdsHeaderDx10::BC1_UNORM | DdsHeaderDx10::BC1_UNORM_SRGB => FourCC::DXT1,
            DdsHeaderDx10::BC2_UNORM | DdsHeaderDx10::BC2_UNORM_SRGB => FourCC::DXT3,
            DdsHeaderDx10::BC3_UNORM | DdsHeaderDx10::BC3_UNORM_SRGB => FourCC::DXT5,
            DdsHeaderDx10::BC4_UNORM => FourCC::BC4U,
            DdsHeaderDx10::BC4_SNORM => FourCC::BC4S,
            DdsHeaderDx10::BC5_UNORM => FourCC::BC5U,
            DdsHeaderDx10::BC5_SNORM => FourCC::BC5S,
            other => {
                warn!("no legacy four_cc for DXGI format {other}, falling back to DXT5");
                FourCC::DXT5
            }
        }
    }

    /// Re-encode the container in legacy (non-extended) header form.
    ///
    /// The output is signature, 124-byte header, pixel payload. Extended
    /// pixel formats are normalized via [`DdsTexture::legacy_four_cc`]; the
    /// DX10 extension record is never written.
    #[instrument(skip(self), err)]
    pub fn to_legacy_bytes(&self) -> Result<Vec<u8>> {
        let mut header = self.header;
        header.pixel_format.four_cc = self.legacy_four_cc();
        header.pixel_format.flags |= DdsPixelFormat::FLAG_FOURCC;

        let capacity = DDS_MAGIC.len() + crate::types::DdsHeader::SIZE as usize + self.data.len();
        let mut writer = Cursor::new(Vec::with_capacity(capacity));
        writer.write_all(DDS_MAGIC)?;
        header.write(&mut writer)?;
        writer.write_all(&self.data)?;

        Ok(writer.into_inner())
    }
}
