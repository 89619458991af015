//! Texture pointer records embedded in `PTEX` entries.

use std::io::Cursor;

use binrw::{BinRead, BinReaderExt, BinWrite, Endian};
use deblob_dds::DdsTexture;

use crate::error::{Error, Result};
use crate::types::DataInfo;

/// Texture pointer found at a fixed offset inside a `PTEX` entry payload.
///
/// The record does not hold pixel data itself; it points into the archive's
/// trailing section, where a complete DDS container is stored.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
pub struct PtexRecord {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Unknown
    pub unknown: u32,

    /// Offset of the DDS container, relative to the trailing section
    pub blob_offset: u32,

    /// Byte size of the DDS container
    pub blob_size: i32,
}

impl PtexRecord {
    /// Fixed offset of the record inside the entry payload.
    pub const OFFSET: usize = 88;

    /// On-disk size of the record.
    pub const SIZE: usize = 20;

    /// Read the record out of a `PTEX` entry payload.
    pub fn parse(payload: &[u8], endian: Endian) -> Result<PtexRecord> {
        let declared = Self::OFFSET + Self::SIZE;
        if payload.len() < declared {
            return Err(Error::UnsupportedSubResource {
                magic: "PTEX",
                reason: format!(
                    "payload of {} bytes cannot hold the {declared}-byte record prefix",
                    payload.len()
                ),
            });
        }

        let mut reader = Cursor::new(&payload[Self::OFFSET..]);
        Ok(reader.read_type(endian)?)
    }
}

/// Decode the texture pointer of a `PTEX` entry and the DDS container it
/// points to inside the trailing section.
pub(crate) fn decode(
    file: &[u8],
    trailing_pool: &DataInfo,
    payload: &[u8],
    endian: Endian,
) -> Result<(PtexRecord, DdsTexture)> {
    let record = PtexRecord::parse(payload, endian)?;

    if record.blob_size < 0 {
        return Err(Error::UnsupportedSubResource {
            magic: "PTEX",
            reason: format!("negative blob size {}", record.blob_size),
        });
    }

    let blob = trailing_pool
        .slice(
            file,
            "trailing",
            i64::from(record.blob_offset),
            record.blob_size as usize,
        )
        .map_err(|e| Error::UnsupportedSubResource {
            magic: "PTEX",
            reason: e.to_string(),
        })?;

    let image = DdsTexture::new(blob).map_err(|e| Error::UnsupportedSubResource {
        magic: "PTEX",
        reason: e.to_string(),
    })?;

    Ok((record, image))
}

#[cfg(test)]
mod test {
    use binrw::Endian;
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::texture::PtexRecord;

    #[test]
    fn parse_record() -> Result<()> {
        let mut payload = vec![0u8; PtexRecord::OFFSET];
        #[rustfmt::skip]
        payload.extend_from_slice(&[
            0x40, 0x00, 0x00, 0x00, // width (64)
            0x20, 0x00, 0x00, 0x00, // height (32)
            0x00, 0x00, 0x00, 0x00, // unknown
            0x80, 0x00, 0x00, 0x00, // blob offset
            0x84, 0x00, 0x00, 0x00, // blob size (132)
        ]);

        let record = PtexRecord::parse(&payload, Endian::Little)?;
        assert_eq!(
            record,
            PtexRecord {
                width: 64,
                height: 32,
                unknown: 0,
                blob_offset: 0x80,
                blob_size: 132,
            }
        );

        Ok(())
    }

    #[test]
    fn parse_short_payload() {
        let payload = vec![0u8; PtexRecord::OFFSET];
        let result = PtexRecord::parse(&payload, Endian::Little);
        assert!(matches!(
            result,
            Err(Error::UnsupportedSubResource { magic: "PTEX", .. })
        ));
    }
}
