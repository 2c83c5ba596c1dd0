#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Edge-case tests for the writer: degenerate inputs, malformed structure,
//! and sink failures.

use pngcheck_poc::core::chunk::{ChunkType, IEND, MEND, MHDR};
use pngcheck_poc::core::container::{MNG_SIGNATURE, PNG_SIGNATURE};
use pngcheck_poc::core::{write_container, Chunk, Container, ContainerFormat};
use pngcheck_poc::error::PocError;

// ============================================================================
// CHUNK EDGE CASES
// ============================================================================

#[test]
fn test_mend_fixed_encoding() {
    let bytes = Chunk::empty(MEND).to_bytes();
    assert_eq!(bytes.len(), 12);
    assert_eq!(&bytes[..8], &[0x00, 0x00, 0x00, 0x00, 0x4D, 0x45, 0x4E, 0x44]);
    assert_eq!(&bytes[8..], &crc32fast::hash(b"MEND").to_be_bytes());
}

#[test]
fn test_empty_payload_via_new_matches_empty() {
    let a = Chunk::new(IEND, Vec::new()).unwrap();
    assert_eq!(a, Chunk::empty(IEND));
    assert_eq!(a.to_bytes(), Chunk::empty(IEND).to_bytes());
}

#[test]
fn test_non_ascii_tag_is_written_verbatim() {
    let tag = ChunkType([0x00, 0xFF, b'a', b'Z']);
    let bytes = Chunk::new(tag, &b"xyz"[..]).unwrap().to_bytes();
    assert_eq!(&bytes[4..8], &[0x00, 0xFF, b'a', b'Z']);
}

#[test]
fn test_payload_contradicting_its_header_is_accepted() {
    // MHDR claims huge dimensions in a payload far too short to back them
    let chunk = Chunk::new(MHDR, &b"\xff\xff\xff\xff"[..]).unwrap();
    assert_eq!(chunk.length(), 4);
    assert_eq!(chunk.to_bytes().len(), 16);
}

#[test]
fn test_large_payload_length_field() {
    let payload = vec![0x41u8; 70_000];
    let bytes = Chunk::new(*b"SEEK", payload).unwrap().to_bytes();
    assert_eq!(&bytes[..4], &70_000u32.to_be_bytes());
}

#[test]
fn test_crc_recomputed_per_chunk_not_cached() {
    let a = Chunk::new(*b"tEXt", &b"a"[..]).unwrap();
    let b = Chunk::new(*b"tEXt", &b"b"[..]).unwrap();
    assert_ne!(a.crc(), b.crc());
    assert_eq!(a.crc(), crc32fast::hash(b"tEXta"));
}

// ============================================================================
// CONTAINER EDGE CASES
// ============================================================================

#[test]
fn test_no_structural_validation() {
    // trailer first, header after, repeated markers: all serialized as given
    let container = Container::new(ContainerFormat::Png).with_chunks([
        Chunk::empty(IEND),
        Chunk::empty(IEND),
        Chunk::empty(MEND),
    ]);
    let bytes = container.to_bytes();
    assert_eq!(bytes.len(), 8 + 3 * 12);
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    assert_eq!(&bytes[8 + 24 + 4..8 + 24 + 8], b"MEND");
}

#[test]
fn test_push_appends_in_order() {
    let mut container = Container::new(ContainerFormat::Mng);
    container.push(Chunk::new(MHDR, vec![0u8; 28]).unwrap());
    container.push(Chunk::empty(MEND));
    let tags: Vec<_> = container.chunks().iter().map(Chunk::chunk_type).collect();
    assert_eq!(tags, vec![MHDR, MEND]);
    assert_eq!(&container.to_bytes()[..8], &MNG_SIGNATURE);
}

// ============================================================================
// SINK EDGE CASES
// ============================================================================

#[test]
fn test_write_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    std::fs::write(&path, vec![0xAAu8; 4096]).unwrap();

    let container = Container::new(ContainerFormat::Png).with_chunks([Chunk::empty(IEND)]);
    let written = container.write_to_path(&path).unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(written, 20);
    assert_eq!(on_disk, container.to_bytes());
}

#[test]
fn test_missing_parent_directory_surfaces_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does").join("not").join("exist.mng");

    match write_container(&MNG_SIGNATURE, &path) {
        Err(PocError::Write { path: failed, source }) => {
            assert_eq!(failed, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Unexpected result: {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn test_write_error_message_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("x.png");
    let err = write_container(b"", &path).unwrap_err();
    assert!(err.to_string().contains("x.png"));
}
