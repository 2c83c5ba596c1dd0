//! Chunk types and chunk serialization
#![allow(non_upper_case_globals)]

use bytes::{BufMut, Bytes, BytesMut};
use crc32fast::Hasher as Crc32;
use std::fmt;

use crate::error::{PocError, Result};

/// Bytes of framing around every payload: length, type and CRC.
pub const CHUNK_OVERHEAD: usize = 12;

/// Largest payload the 4-byte length field can describe.
pub const MAX_CHUNK_PAYLOAD: usize = u32::MAX as usize;

/// Raw 4-byte chunk tag. Letter case is meaningful to readers but not here.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);

// -- PNG --

/// Image header
pub const IHDR: ChunkType = ChunkType(*b"IHDR");
/// Image data
pub const IDAT: ChunkType = ChunkType(*b"IDAT");
/// Image trailer
pub const IEND: ChunkType = ChunkType(*b"IEND");
/// Physical scale of image subject
pub const sCAL: ChunkType = ChunkType(*b"sCAL");

// -- MNG --

/// MNG header
pub const MHDR: ChunkType = ChunkType(*b"MHDR");
/// MNG trailer
pub const MEND: ChunkType = ChunkType(*b"MEND");
/// Loop start
pub const LOOP: ChunkType = ChunkType(*b"LOOP");
/// Discard objects
pub const DISC: ChunkType = ChunkType(*b"DISC");
/// Drop chunks
pub const DROP: ChunkType = ChunkType(*b"DROP");
/// Drop chunks by keyword
pub const DBYK: ChunkType = ChunkType(*b"DBYK");
/// Resources needed
pub const nEED: ChunkType = ChunkType(*b"nEED");
/// Ordering restrictions
pub const ORDR: ChunkType = ChunkType(*b"ORDR");
/// Paste image
pub const PAST: ChunkType = ChunkType(*b"PAST");
/// Partial palette
pub const PPLT: ChunkType = ChunkType(*b"PPLT");
/// Save information
pub const SAVE: ChunkType = ChunkType(*b"SAVE");
/// Seek point
pub const SEEK: ChunkType = ChunkType(*b"SEEK");

impl ChunkType {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for ChunkType {
    fn from(tag: [u8; 4]) -> Self {
        ChunkType(tag)
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ChunkType({self})")
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

/// A single typed, length-prefixed, checksummed unit.
///
/// Only the tag and payload are stored. Length and CRC are derived on every
/// call, so a chunk can never carry framing that disagrees with its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    chunk_type: ChunkType,
    payload: Bytes,
}

impl Chunk {
    /// Build a chunk from a tag and any payload.
    ///
    /// # Errors
    /// Returns `PocError::OversizedChunk` if the payload cannot be described
    /// by the 4-byte length field.
    pub fn new(chunk_type: impl Into<ChunkType>, payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        if payload.len() > MAX_CHUNK_PAYLOAD {
            return Err(PocError::OversizedChunk(payload.len()));
        }
        Ok(Self {
            chunk_type: chunk_type.into(),
            payload,
        })
    }

    /// A chunk with no payload, e.g. the `IEND`/`MEND` end markers.
    pub fn empty(chunk_type: impl Into<ChunkType>) -> Self {
        Self {
            chunk_type: chunk_type.into(),
            payload: Bytes::new(),
        }
    }

    pub fn chunk_type(&self) -> ChunkType {
        self.chunk_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Value of the length field. Construction guarantees it fits.
    pub fn length(&self) -> u32 {
        self.payload.len() as u32
    }

    /// CRC-32 over `type || payload`.
    pub fn crc(&self) -> u32 {
        let mut hasher = Crc32::new();
        hasher.update(&self.chunk_type.0);
        hasher.update(&self.payload);
        hasher.finalize()
    }

    /// Total serialized size: framing plus payload.
    pub fn encoded_len(&self) -> usize {
        CHUNK_OVERHEAD + self.payload.len()
    }

    /// Append the serialized chunk to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(self.encoded_len());
        dst.put_u32(self.length());
        dst.put_slice(&self.chunk_type.0);
        dst.put_slice(&self.payload);
        dst.put_u32(self.crc());
    }

    /// Serialize to a standalone byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf.to_vec()
    }
}
