use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

use crate::error::{PocError, Result};

/// zlib's own default level, matching what image writers emit for `IDAT`.
pub const DEFAULT_LEVEL: u32 = 6;

/// Compresses data into a complete zlib stream (header, deflate body, Adler-32).
///
/// # Errors
/// Returns `PocError::CompressionFailure` if the encoder fails
pub fn zlib_compress(data: &[u8]) -> Result<Vec<u8>> {
    zlib_compress_level(data, DEFAULT_LEVEL)
}

/// Same as [`zlib_compress`] with an explicit level (0-9, clamped).
pub fn zlib_compress_level(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::new(level.min(9)));
    enc.write_all(data)
        .map_err(|_| PocError::CompressionFailure)?;
    enc.finish().map_err(|_| PocError::CompressionFailure)
}
