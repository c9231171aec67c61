//! Shared fixtures for integration tests.

#![allow(dead_code)]

#[path = "../../src/core/metadata/fixtures.rs"]
mod fixtures;

pub(crate) use fixtures::{jpeg_with_exif, plain_png, png_with_exif};
