//! Types for reading TRB archives
//!

use std::io::{Cursor, Read};

use binrw::{BinReaderExt, Endian};
use byteorder::ReadBytesExt;
use deblob_dds::DdsTexture;
use tracing::{debug, instrument, warn};

use crate::entity::EntityHeader;
use crate::error::{Error, FileNotFoundError, LayoutInvariantError, Result};
use crate::model::{self, PmdlModel};
use crate::texture::{self, PtexRecord};
use crate::types::{DataInfo, TagInfo, TrbHeader};

/// Embedded structure decoded out of an entry, selected by its tag magic.
///
/// Entries whose magic is unrecognized, or whose recognized structure fails
/// to decode, stay [`SubResource::Opaque`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubResource {
    /// No decoded embedded structure
    Opaque,

    /// `PTEX`: texture pointer plus the DDS container it points to
    Texture {
        /// Pointer record at the fixed offset inside the entry payload
        record: PtexRecord,
        /// Decoded DDS container from the trailing section
        image: DdsTexture,
    },

    /// `PMDL`: mesh section
    Model(PmdlModel),

    /// `enti`: entity/property table header
    EntityTable(EntityHeader),
}

/// One named file stored in the archive.
///
/// The payload may be replaced between decode and encode; the writer rewrites
/// it at the entry's original location, so entry count and order must stay
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// Name as stored in the text pool, without extension
    pub name: String,

    /// 4-byte sub-format code from the entry's tag
    pub magic: [u8; 4],

    /// Entry payload, sliced out of the raw payload pool
    pub data: Vec<u8>,

    /// Embedded structure decoded from the payload
    pub resource: SubResource,
}

impl FileEntry {
    /// Display file name: the stored name plus an extension derived from the
    /// magic, unless the magic is all zero.
    pub fn file_name(&self) -> String {
        match TagInfo::extension_of(self.magic) {
            Some(extension) => format!("{}.{}", self.name, extension),
            None => self.name.clone(),
        }
    }
}

/// TRB archive reader
///
/// Buffers and decodes a whole container. Decoded entries stay mutable until
/// [`TrbArchive::to_bytes`](crate::write) re-emits the container.
///
/// ```no_run
/// use std::fs::File;
///
/// fn list_trb_contents(path: &str) -> deblob_trb::error::Result<()> {
///     let trb = deblob_trb::TrbArchive::new(File::open(path)?)?;
///
///     for entry in trb.entries() {
///         println!("{}: {} bytes", entry.file_name(), entry.data.len());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TrbArchive {
    pub(crate) endian: Endian,
    pub(crate) header: TrbHeader,
    pub(crate) data_infos: Vec<DataInfo>,
    pub(crate) tag_infos: Vec<TagInfo>,
    pub(crate) entries: Vec<FileEntry>,
    pub(crate) extra_data: Option<Vec<u8>>,
    pub(crate) relocation_data: Vec<u8>,
    pub(crate) original_len: usize,
}

impl TrbArchive {
    /// Whether the buffer starts with the `"TRB"` signature.
    pub fn identify(bytes: &[u8]) -> bool {
        bytes.starts_with(TrbHeader::MAGIC)
    }

    /// Read a TRB archive, buffering the whole stream.
    pub fn new(mut reader: impl Read) -> Result<TrbArchive> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Self::from_bytes(&buffer)
    }

    /// Decode a TRB archive from an in-memory buffer.
    #[instrument(skip(bytes), err)]
    pub fn from_bytes(bytes: &[u8]) -> Result<TrbArchive> {
        if !Self::identify(bytes) {
            return Err(Error::InvalidSignature);
        }
        if bytes.len() < TrbHeader::SIZE {
            return Err(Error::Truncated {
                declared: TrbHeader::SIZE,
                available: bytes.len(),
            });
        }

        // The version field doubles as the byte-order probe: 2001 when read
        // little-endian, a swapped value otherwise.
        let probe = u32::from_le_bytes([bytes[3], bytes[4], bytes[5], bytes[6]]);
        let endian = if probe == TrbHeader::VERSION {
            Endian::Little
        } else {
            Endian::Big
        };
        debug!(?endian, "detected byte order");

        let mut reader = Cursor::new(bytes);
        let header: TrbHeader = reader.read_type(endian)?;

        let data_infos = Self::read_data_infos(&mut reader, &header, bytes.len(), endian)?;
        let tag_infos = Self::read_tag_infos(&mut reader, &header, bytes.len(), endian)?;

        if data_infos.len() < 2 {
            return Err(LayoutInvariantError::TooFewSections(data_infos.len()).into());
        }
        for index in 1..tag_infos.len() {
            if tag_infos[index].data_offset < tag_infos[index - 1].data_offset {
                return Err(LayoutInvariantError::TagOrder(index).into());
            }
        }

        let text_pool = data_infos[0];
        let raw_pool = data_infos[1];

        let mut entries = Vec::with_capacity(tag_infos.len());
        for (index, tag) in tag_infos.iter().enumerate() {
            let name = read_pool_name(bytes, &text_pool, tag.text_offset)?;
            let length = entry_length(&tag_infos, index, &raw_pool)?;
            let payload = raw_pool.slice(bytes, "raw", i64::from(tag.data_offset), length)?;
            let resource = resolve_resource(bytes, &data_infos, index, tag, payload, endian);

            debug!(%name, length, "resolved entry");
            entries.push(FileEntry {
                name,
                magic: tag.magic,
                data: payload.to_vec(),
                resource,
            });
        }
        debug_assert_eq!(entries.len(), header.tag_count as usize);

        let relocation_data = read_relocation(bytes, &header)?;
        let extra_data = read_extra(bytes, &data_infos)?;

        Ok(TrbArchive {
            endian,
            header,
            data_infos,
            tag_infos,
            entries,
            extra_data,
            relocation_data,
            original_len: bytes.len(),
        })
    }

    fn read_data_infos(
        reader: &mut Cursor<&[u8]>,
        header: &TrbHeader,
        available: usize,
        endian: Endian,
    ) -> Result<Vec<DataInfo>> {
        let count = header.data_info_count as usize;
        let declared = TrbHeader::SIZE + count * DataInfo::SIZE;
        if declared > available {
            return Err(Error::Truncated {
                declared,
                available,
            });
        }

        let mut data_infos = Vec::with_capacity(count);
        for index in 0..count {
            let info: DataInfo = reader.read_type(endian)?;
            if !info.reserved_zeroed() {
                warn!("data section {index} has non-zero reserved fields");
            }
            data_infos.push(info);
        }
        Ok(data_infos)
    }

    fn read_tag_infos(
        reader: &mut Cursor<&[u8]>,
        header: &TrbHeader,
        available: usize,
        endian: Endian,
    ) -> Result<Vec<TagInfo>> {
        let count = header.tag_count as usize;
        let declared = TrbHeader::SIZE
            + header.data_info_count as usize * DataInfo::SIZE
            + count * TagInfo::SIZE;
        if declared > available {
            return Err(Error::Truncated {
                declared,
                available,
            });
        }

        (0..count)
            .map(|_| reader.read_type(endian).map_err(Error::from))
            .collect()
    }

    /// Number of entries contained in this archive.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this archive contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Detected byte order; shared by every table and pool field.
    pub fn byte_order(&self) -> Endian {
        self.endian
    }

    /// The decoded file header.
    pub fn header(&self) -> &TrbHeader {
        &self.header
    }

    /// The decoded section table.
    pub fn data_infos(&self) -> &[DataInfo] {
        &self.data_infos
    }

    /// The decoded tag table, index-aligned with [`TrbArchive::entries`].
    pub fn tag_infos(&self) -> &[TagInfo] {
        &self.tag_infos
    }

    /// Resolved entries, in tag-table order.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Mutable access to the entries for payload replacement. The slice
    /// cannot grow or shrink; the writer depends on count and order.
    pub fn entries_mut(&mut self) -> &mut [FileEntry] {
        &mut self.entries
    }

    /// Returns an iterator over the display names of all entries.
    pub fn file_names(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(FileEntry::file_name)
    }

    /// Get a contained file by index.
    pub fn by_index(&self, index: usize) -> Result<&FileEntry> {
        self.entries
            .get(index)
            .ok_or_else(|| FileNotFoundError::Index(index).into())
    }

    /// Mutable access to a contained file by index.
    pub fn by_index_mut(&mut self, index: usize) -> Result<&mut FileEntry> {
        self.entries
            .get_mut(index)
            .ok_or_else(|| FileNotFoundError::Index(index).into())
    }

    /// Search for a file entry by its display name.
    pub fn by_name(&self, name: &str) -> Result<&FileEntry> {
        self.entries
            .iter()
            .find(|entry| entry.file_name() == name)
            .ok_or_else(|| FileNotFoundError::Name(name.to_owned()).into())
    }

    /// Mutable search for a file entry by its display name.
    pub fn by_name_mut(&mut self, name: &str) -> Result<&mut FileEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.file_name() == name)
            .ok_or_else(|| FileNotFoundError::Name(name.to_owned()).into())
    }

    /// Texture pointers and their decoded DDS containers, in encounter order.
    pub fn textures(&self) -> impl Iterator<Item = (&PtexRecord, &DdsTexture)> {
        self.entries.iter().filter_map(|entry| match &entry.resource {
            SubResource::Texture { record, image } => Some((record, image)),
            _ => None,
        })
    }

    /// Mutable variant of [`TrbArchive::textures`] for image replacement.
    pub fn textures_mut(&mut self) -> impl Iterator<Item = (&PtexRecord, &mut DdsTexture)> {
        self.entries
            .iter_mut()
            .filter_map(|entry| match &mut entry.resource {
                SubResource::Texture { record, image } => Some((&*record, image)),
                _ => None,
            })
    }

    /// Number of entries carrying a decoded texture.
    pub fn texture_count(&self) -> usize {
        self.textures().count()
    }

    /// The relocation block, carried verbatim.
    pub fn relocation_data(&self) -> &[u8] {
        &self.relocation_data
    }

    /// The optional extra section, carried verbatim.
    pub fn extra_data(&self) -> Option<&[u8]> {
        self.extra_data.as_deref()
    }

    /// Byte length of the source file; the writer's output length.
    pub fn original_len(&self) -> usize {
        self.original_len
    }
}

/// Length of entry `index`: delta to the next tag's offset, or the remainder
/// of the raw payload pool for the final entry.
fn entry_length(tags: &[TagInfo], index: usize, raw_pool: &DataInfo) -> Result<usize> {
    let current = i64::from(tags[index].data_offset);
    let length = match tags.get(index + 1) {
        Some(next) => i64::from(next.data_offset) - current,
        None => i64::from(raw_pool.data_size) - current,
    };

    if length < 0 {
        return Err(LayoutInvariantError::NegativeLength {
            region: format!("entry {index}"),
        }
        .into());
    }
    Ok(length as usize)
}

/// Read a null-terminated name at `rel` bytes into the text pool.
fn read_pool_name(file: &[u8], text_pool: &DataInfo, rel: i32) -> Result<String> {
    if rel < 0 {
        return Err(LayoutInvariantError::OffsetBeforePool {
            pool: "text",
            offset: i64::from(rel),
        }
        .into());
    }

    let start = text_pool.data_offset as usize + rel as usize;
    if start >= file.len() {
        return Err(Error::Truncated {
            declared: start + 1,
            available: file.len(),
        });
    }

    let mut reader = Cursor::new(&file[start..]);
    let mut raw = Vec::new();
    loop {
        let byte = reader.read_u8().map_err(|_| Error::Truncated {
            declared: file.len() + 1,
            available: file.len(),
        })?;
        if byte == b'\0' {
            break;
        }
        raw.push(byte);
    }

    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Dispatch on the tag magic. Failures inside a recognized sub-format keep
/// the entry as an opaque file and only skip the decoration.
fn resolve_resource(
    file: &[u8],
    data_infos: &[DataInfo],
    index: usize,
    tag: &TagInfo,
    payload: &[u8],
    endian: Endian,
) -> SubResource {
    let raw_pool = &data_infos[1];
    let trailing_pool = &data_infos[data_infos.len() - 1];

    match tag.magic {
        TagInfo::TEXTURE => match texture::decode(file, trailing_pool, payload, endian) {
            Ok((record, image)) => SubResource::Texture { record, image },
            Err(error) => {
                warn!("keeping entry {index} opaque: {error}");
                SubResource::Opaque
            }
        },
        TagInfo::MODEL => match model::decode(file, raw_pool, payload, endian) {
            Ok(pmdl) => SubResource::Model(pmdl),
            Err(error) => {
                warn!("keeping entry {index} opaque: {error}");
                SubResource::Opaque
            }
        },
        TagInfo::ENTITY if index == 0 => match EntityHeader::parse(payload, endian) {
            Ok(header) => SubResource::EntityTable(header),
            Err(error) => {
                warn!("keeping entry {index} opaque: {error}");
                SubResource::Opaque
            }
        },
        _ => SubResource::Opaque,
    }
}

/// Capture the relocation block verbatim.
fn read_relocation(file: &[u8], header: &TrbHeader) -> Result<Vec<u8>> {
    if header.relocation_data_size < 0 {
        return Err(LayoutInvariantError::NegativeLength {
            region: "relocation block".into(),
        }
        .into());
    }

    let start = header.relocation_data_offset as usize;
    let end = start + header.relocation_data_size as usize;
    if end > file.len() {
        return Err(Error::Truncated {
            declared: end,
            available: file.len(),
        });
    }
    Ok(file[start..end].to_vec())
}

/// Capture the optional extra section verbatim.
fn read_extra(file: &[u8], data_infos: &[DataInfo]) -> Result<Option<Vec<u8>>> {
    let Some(info) = data_infos.get(2) else {
        return Ok(None);
    };

    if info.data_size < 0 {
        return Err(LayoutInvariantError::NegativeLength {
            region: "extra section".into(),
        }
        .into());
    }

    info.slice(file, "extra", 0, info.data_size as usize)
        .map(|bytes| Some(bytes.to_vec()))
}
