//! # Utility Modules
//!
//! Supporting utilities for compression and logging.
//!
//! ## Components
//! - **Compression**: zlib streams for image-data chunks
//! - **Logging**: `tracing` subscriber set-up driven by configuration

pub mod compression;
pub mod logging;
