//! Types for writing TRB archives
//!
//! The writer re-emits a decoded container into a zero-filled buffer of the
//! original file length using positional overwrites only. Pools are never
//! grown or moved; a payload that shrank leaves zero padding inside its
//! original span, and a write landing outside the buffer aborts the whole
//! operation.

use std::io::{Cursor, Write};

use binrw::BinWriterExt;
use tracing::instrument;

use crate::error::{LayoutInvariantError, Result};
use crate::read::{SubResource, TrbArchive};
use crate::types::{DataInfo, TagInfo, TrbHeader};

/// Labels of the two leading pools, rewritten at the base of the text pool.
const POOL_LABELS: &[u8] = b".text\0.data\0";

impl TrbArchive {
    /// Re-emit the container byte-for-byte at its original size.
    ///
    /// Unmodified entries and sub-resources reproduce their original bytes;
    /// replaced payloads are overwritten in place and zero-padded to their
    /// original spans. Texture blobs are re-encoded in legacy DDS header
    /// form (see [`deblob_dds::DdsTexture::to_legacy_bytes`]).
    #[instrument(skip(self), err)]
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.original_len];

        self.write_header_and_tables(&mut out)?;
        self.write_text_pool(&mut out)?;
        self.write_payloads(&mut out)?;
        self.write_extra(&mut out)?;
        self.write_relocation(&mut out)?;
        self.write_texture_blobs(&mut out)?;

        Ok(out)
    }

    /// Re-emit the container into a writer.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(&self.to_bytes()?)?;
        Ok(())
    }

    fn write_header_and_tables(&self, out: &mut [u8]) -> Result<()> {
        let capacity = TrbHeader::SIZE
            + self.data_infos.len() * DataInfo::SIZE
            + self.tag_infos.len() * TagInfo::SIZE;
        let mut cursor = Cursor::new(Vec::with_capacity(capacity));

        cursor.write_type(&self.header, self.endian)?;
        for info in &self.data_infos {
            cursor.write_type(info, self.endian)?;
        }
        for tag in &self.tag_infos {
            cursor.write_type(tag, self.endian)?;
        }

        put(out, "header and tables", 0, &cursor.into_inner())
    }

    /// Positional rewrite of the text pool: the two pool labels at the pool
    /// base, then each entry name at its stored offset. The pool layout is
    /// fixed at load time and never grows.
    fn write_text_pool(&self, out: &mut [u8]) -> Result<()> {
        let text_pool = &self.data_infos[0];
        put(out, "pool labels", text_pool.data_offset as usize, POOL_LABELS)?;

        for (tag, entry) in self.tag_infos.iter().zip(&self.entries) {
            let target = pool_target(text_pool, "text", i64::from(tag.text_offset))?;

            let mut name = Vec::with_capacity(entry.name.len() + 1);
            name.extend_from_slice(entry.name.as_bytes());
            name.push(b'\0');
            put(out, "entry name", target, &name)?;
        }
        Ok(())
    }

    fn write_payloads(&self, out: &mut [u8]) -> Result<()> {
        let raw_pool = &self.data_infos[1];

        for (tag, entry) in self.tag_infos.iter().zip(&self.entries) {
            let target = pool_target(raw_pool, "raw", i64::from(tag.data_offset))?;
            put(out, "entry payload", target, &entry.data)?;
        }
        Ok(())
    }

    fn write_extra(&self, out: &mut [u8]) -> Result<()> {
        match (&self.extra_data, self.data_infos.get(2)) {
            (Some(extra), Some(info)) => {
                put(out, "extra section", info.data_offset as usize, extra)
            }
            _ => Ok(()),
        }
    }

    fn write_relocation(&self, out: &mut [u8]) -> Result<()> {
        put(
            out,
            "relocation block",
            self.header.relocation_data_offset as usize,
            &self.relocation_data,
        )
    }

    /// Re-encode every texture blob into the trailing section, in the order
    /// the pointers were decoded. Each blob is zero-padded to its original
    /// size; one that grew past its original span aborts the write.
    fn write_texture_blobs(&self, out: &mut [u8]) -> Result<()> {
        let trailing_pool = &self.data_infos[self.data_infos.len() - 1];

        for entry in &self.entries {
            let SubResource::Texture { record, image } = &entry.resource else {
                continue;
            };

            let target = pool_target(trailing_pool, "trailing", i64::from(record.blob_offset))?;
            let blob = image.to_legacy_bytes()?;
            if blob.len() > record.blob_size as usize {
                return Err(LayoutInvariantError::WriteOutOfBounds {
                    region: "texture blob",
                    offset: target,
                    end: target + blob.len(),
                    bound: target + record.blob_size as usize,
                }
                .into());
            }

            put(out, "texture blob", target, &blob)?;
        }
        Ok(())
    }
}

/// Copy `bytes` into `out` at `offset`, rejecting writes past the end.
fn put(out: &mut [u8], region: &'static str, offset: usize, bytes: &[u8]) -> Result<()> {
    let end = offset + bytes.len();
    if end > out.len() {
        return Err(LayoutInvariantError::WriteOutOfBounds {
            region,
            offset,
            end,
            bound: out.len(),
        }
        .into());
    }

    out[offset..end].copy_from_slice(bytes);
    Ok(())
}

/// Absolute target of a pool-relative offset.
fn pool_target(pool: &DataInfo, pool_name: &'static str, rel: i64) -> Result<usize> {
    if rel < 0 {
        return Err(LayoutInvariantError::OffsetBeforePool {
            pool: pool_name,
            offset: rel,
        }
        .into());
    }
    Ok(pool.data_offset as usize + rel as usize)
}
