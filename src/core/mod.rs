//! # Core Container Components
//!
//! Chunk serialization and the signature-prefixed container stream.
//!
//! This module is the whole writer: it turns an ordered list of
//! (type tag, payload) pairs into the byte stream consumed by PNG/MNG readers.
//!
//! ## Components
//! - **Chunk**: typed, length-prefixed, CRC-checksummed unit
//! - **Container**: family signature followed by chunks, plus the file sink
//!
//! ## Wire Format
//! ```text
//! [Signature(8)] { [Length(4, BE)] [Type(4)] [Payload(N)] [CRC-32(4, BE)] }*
//! ```
//!
//! The writer never checks that chunks form a meaningful file. Producing
//! inconsistent structure on purpose is what the generated files are for.

pub mod chunk;
pub mod container;

pub use chunk::{Chunk, ChunkType};
pub use container::{write_container, Container, ContainerFormat};
