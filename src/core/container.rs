//! Signature-prefixed chunk streams and the file sink.

use bytes::{BufMut, BytesMut};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use super::chunk::Chunk;
use crate::error::{PocError, Result};

/// PNG still-image signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// MNG multi-frame signature.
pub const MNG_SIGNATURE: [u8; 8] = [0x8A, b'M', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Container family, selecting the signature and conventional extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    /// Still image (`.png`)
    Png,
    /// Multi-frame image (`.mng`)
    Mng,
}

impl ContainerFormat {
    pub fn signature(self) -> [u8; 8] {
        match self {
            ContainerFormat::Png => PNG_SIGNATURE,
            ContainerFormat::Mng => MNG_SIGNATURE,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ContainerFormat::Png => "png",
            ContainerFormat::Mng => "mng",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ContainerFormat::Png => "PNG",
            ContainerFormat::Mng => "MNG",
        }
    }
}

/// An ordered chunk list behind a family signature.
///
/// Nothing about the sequence is checked: no required first or last chunk,
/// no cross-field consistency, no size limit beyond each chunk's own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    format: ContainerFormat,
    chunks: Vec<Chunk>,
}

impl Container {
    pub fn new(format: ContainerFormat) -> Self {
        Self {
            format,
            chunks: Vec::new(),
        }
    }

    pub fn with_chunks(mut self, chunks: impl IntoIterator<Item = Chunk>) -> Self {
        self.chunks.extend(chunks);
        self
    }

    pub fn push(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    pub fn format(&self) -> ContainerFormat {
        self.format
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn encoded_len(&self) -> usize {
        8 + self.chunks.iter().map(Chunk::encoded_len).sum::<usize>()
    }

    /// Append the full stream to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(self.encoded_len());
        dst.put_slice(&self.format.signature());
        for chunk in &self.chunks {
            debug!(
                chunk_type = %chunk.chunk_type(),
                length = chunk.length(),
                crc = chunk.crc(),
                "encoding chunk"
            );
            chunk.encode(dst);
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf.to_vec()
    }

    /// Serialize into any sink.
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<()> {
        sink.write_all(&self.to_bytes())?;
        sink.flush()?;
        Ok(())
    }

    /// Serialize and write to `path`, creating or truncating it.
    /// Returns the number of bytes written.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let bytes = self.to_bytes();
        write_container(&bytes, path)?;
        Ok(bytes.len())
    }
}

/// Write an already-serialized container stream to `path`.
///
/// The destination is created or overwritten. There is no atomic rename, so
/// an interrupted write can leave a partial file behind.
///
/// # Errors
/// Returns `PocError::Write` with the underlying I/O error if the path cannot
/// be opened or written (missing parent directory, permissions).
pub fn write_container<P: AsRef<Path>>(bytes: &[u8], path: P) -> Result<()> {
    let path = path.as_ref();
    let wrap = |source| PocError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(wrap)?;
    writer.flush().map_err(wrap)?;

    info!(path = %path.display(), bytes = bytes.len(), "container written");
    Ok(())
}
