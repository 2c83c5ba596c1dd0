//! # pngcheck-poc
//!
//! Builds deliberately malformed PNG and MNG files that reproduce known
//! out-of-bounds reads and a null-pointer dereference in the `pngcheck`
//! validator.
//!
//! The crate is a thin writer over the chunked container format:
//!
//! ```text
//! [Signature(8)] { [Length(4, BE)] [Type(4)] [Payload(N)] [CRC-32(4, BE)] }*
//! ```
//!
//! plus a static catalog of scenarios keyed by target release, and a
//! generator that writes them to disk.
//!
//! ## Example
//! ```rust
//! use pngcheck_poc::core::{chunk, Chunk, Container, ContainerFormat};
//!
//! let container = Container::new(ContainerFormat::Png).with_chunks([Chunk::empty(chunk::IEND)]);
//! let bytes = container.to_bytes();
//! assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
//! assert_eq!(bytes.len(), 8 + 12);
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod generator;
pub mod utils;

pub use crate::catalog::{Scenario, TargetRelease};
pub use crate::core::{Chunk, ChunkType, Container, ContainerFormat};
pub use crate::error::{PocError, Result};
pub use crate::generator::{Generator, Progress, Selection};
