//! Minimal JPEG and PNG files carrying an EXIF block, for tests.
//!
//! Also compiled into the integration tests through `tests/common`.

use std::path::PathBuf;
use tempfile::TempDir;

const ASCII: u16 = 2;
const SHORT: u16 = 3;
const LONG: u16 = 4;
const TAG_ORIENTATION: u16 = 0x0112;
const TAG_DATE_TIME: u16 = 0x0132;
const TAG_EXIF_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;

fn ascii(value: &str) -> Vec<u8> {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    // Values of four bytes or less would be stored inline
    assert!(bytes.len() > 4, "fixture strings must be longer than 3 chars");
    bytes
}

fn entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    out.extend_from_slice(&tag.to_be_bytes());
    out.extend_from_slice(&kind.to_be_bytes());
    out.extend_from_slice(&count.to_be_bytes());
    out.extend_from_slice(&value.to_be_bytes());
}

/// Big-endian TIFF block with an orientation tag, plus `DateTime` in IFD0
/// and `DateTimeOriginal` in the Exif sub-IFD, each only when given.
fn tiff(original: Option<&str>, modified: Option<&str>) -> Vec<u8> {
    let ifd0_entries = 1 + modified.is_some() as u32 + original.is_some() as u32;
    let ifd0_len = 2 + 12 * ifd0_entries + 4;
    let mut data_offset = 8 + ifd0_len;

    let mut ifd0 = Vec::new();
    let mut data = Vec::new();
    ifd0.extend_from_slice(&(ifd0_entries as u16).to_be_bytes());
    entry(&mut ifd0, TAG_ORIENTATION, SHORT, 1, 1 << 16);

    if let Some(value) = modified {
        let bytes = ascii(value);
        entry(&mut ifd0, TAG_DATE_TIME, ASCII, bytes.len() as u32, data_offset);
        data_offset += bytes.len() as u32;
        data.extend(bytes);
    }

    if let Some(value) = original {
        let exif_ifd = data_offset;
        entry(&mut ifd0, TAG_EXIF_POINTER, LONG, 1, exif_ifd);

        let bytes = ascii(value);
        data.extend_from_slice(&1u16.to_be_bytes());
        entry(
            &mut data,
            TAG_DATE_TIME_ORIGINAL,
            ASCII,
            bytes.len() as u32,
            exif_ifd + 2 + 12 + 4,
        );
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend(bytes);
    }

    ifd0.extend_from_slice(&0u32.to_be_bytes());

    let mut out = b"MM\0\x2a".to_vec();
    out.extend_from_slice(&8u32.to_be_bytes());
    out.extend(ifd0);
    out.extend(data);
    out
}

/// A JPEG that is just SOI, an APP1 Exif segment and EOI
pub(crate) fn jpeg_with_exif(original: Option<&str>, modified: Option<&str>) -> Vec<u8> {
    let tiff = tiff(original, modified);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend(tiff);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// Compressed scanline of a 1x1 RGB image
const IDAT_1X1: [u8; 12] = [
    0x08, 0xD7, 0x63, 0xF8, 0xFF, 0xFF, 0x3F, 0x00, 0x05, 0xFE, 0x02, 0xFE,
];

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in bytes {
        crc ^= byte as u32;
        for _ in 0..8 {
            crc = if crc & 1 == 1 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
        }
    }
    !crc
}

fn png_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    let mut body = kind.to_vec();
    body.extend_from_slice(data);

    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(&body);
    out.extend_from_slice(&crc32(&body).to_be_bytes());
}

fn png(exif: Option<Vec<u8>>) -> Vec<u8> {
    let mut out = b"\x89PNG\r\n\x1a\n".to_vec();

    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&1u32.to_be_bytes());
    ihdr.extend_from_slice(&1u32.to_be_bytes());
    // 8-bit RGB, default compression, filter and interlace
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
    png_chunk(&mut out, b"IHDR", &ihdr);

    if let Some(tiff) = exif {
        png_chunk(&mut out, b"eXIf", &tiff);
    }

    png_chunk(&mut out, b"IDAT", &IDAT_1X1);
    png_chunk(&mut out, b"IEND", &[]);
    out
}

/// A 1x1 PNG whose `eXIf` chunk carries the given dates
pub(crate) fn png_with_exif(original: Option<&str>, modified: Option<&str>) -> Vec<u8> {
    png(Some(tiff(original, modified)))
}

/// A 1x1 PNG with no EXIF at all
pub(crate) fn plain_png() -> Vec<u8> {
    png(None)
}

pub(crate) fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, bytes).unwrap();
    path
}
