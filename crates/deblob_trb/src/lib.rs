//! This library handles reading from and rewriting **TRB** archives used by *de Blob 2*.
//!
//! # TRB Archive Format Documentation
//!
//! This crate provides utilities to read, edit and re-serialize the **TRB**
//! archive format used by the game *de Blob 2*. A TRB file bundles named
//! sub-files (textures, 3D models, entity/property data) in one blob behind
//! an indirect table scheme: a table of sections ("pools"), a table of file
//! tags whose offsets are relative to those pools, and a relocation block of
//! pointer fix-ups that is carried verbatim. TRB files are typically
//! identified with the `.trb` extension.
//!
//! ## File Structure
//!
//! A TRB file consists of a header, a section table, a tag table, the pools
//! the sections describe, and the relocation block.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 3 bytes: `"TRB"`                                           |
//! | 0x0003         | Version                | 4 bytes: Fixed value 2001, doubles as the byte-order probe |
//! | 0x0007         | Unknown                | 4 bytes                                                    |
//! | 0x000B         | Flags                  | 2 + 2 bytes                                                |
//! | 0x000F         | Section Count          | 4 bytes: Number of section records                         |
//! | 0x0013         | Section Record Size    | 4 bytes: Declared size of one section record               |
//! | 0x0017         | Tag Count              | 4 bytes: Number of tag records                             |
//! | 0x001B         | Tag Record Size        | 4 bytes: Declared size of one tag record                   |
//! | 0x001F         | Relocation Offset      | 4 bytes: Absolute offset of the relocation block           |
//! | 0x0023         | Relocation Size        | 4 bytes: Byte size of the relocation block                 |
//! | 0x0027         | Reserved               | 92 bytes: Carried verbatim                                 |
//!
//! ### Byte Order
//!
//! Multi-byte integers are little-endian by default. The version field read
//! little-endian equals 2001 in little-endian files; any other value switches
//! the whole file, tables and pool fields included, to big-endian.
//!
//! ### Section Table
//!
//! One 48-byte record per section, immediately after the header. Section 0
//! is the text/name pool, section 1 the raw payload pool, section 2 an
//! optional extra pool, and the final section holds sub-resource blobs
//! (DDS containers). See [`types::DataInfo`] for the field layout.
//!
//! ### Tag Table
//!
//! One 16-byte record per stored file, immediately after the section table:
//! a 4-byte ASCII sub-format magic, a payload offset relative to the raw
//! pool, a flag, and a name offset relative to the text pool. Tags are
//! stored in ascending payload-offset order; a file's byte length is the
//! delta to the next tag's offset, and the final file runs to the end of the
//! raw pool.
//!
//! ### Sub-Formats
//!
//! Recognized magics get their embedded structure decoded during entry
//! resolution:
//!
//! - **`PTEX`**: a texture pointer at a fixed offset inside the payload,
//!   addressing a DDS container in the trailing section
//!   (see [`texture::PtexRecord`] and the `deblob_dds` crate).
//! - **`PMDL`**: a model mesh section with a submesh descriptor table and
//!   vertex/face stream offsets (see [`model::PmdlModel`]).
//! - **`enti`**: when carried by the first tag, an entity/property table
//!   header (see [`entity::EntityHeader`]; property values themselves are
//!   not decoded).
//!
//! Any other magic, including the all-zero "no extension" magic, is kept as
//! an opaque entry.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.trb`
//! - **Endianness**: Little-endian, or big-endian when the probe fails
//! - **Writing**: positional overwrites into a buffer of the original file
//!   size; pools never grow, shrunken payloads leave zero padding
//!

pub mod entity;
pub mod error;
pub mod model;
pub mod read;
pub mod texture;
pub mod types;
pub mod write;

pub use error::{Error, Result};
pub use read::{FileEntry, SubResource, TrbArchive};
