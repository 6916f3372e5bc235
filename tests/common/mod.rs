//! Shared fixtures and mocks for the integration test suite.
#![allow(dead_code)]

pub mod mocks;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for tests (idempotent).
pub fn init() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .init();
    });
}

/// Build a valid Sphinx v2 `objects.inv` payload from raw record lines.
pub fn build_inventory(records: &str) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(b"# Sphinx inventory version 2\n");
    payload.extend_from_slice(b"# Project: example\n");
    payload.extend_from_slice(b"# Version: 1.0\n");
    payload.extend_from_slice(b"# The remainder of this file is compressed using zlib.\n");

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(records.as_bytes()).unwrap();
    payload.extend_from_slice(&encoder.finish().unwrap());
    payload
}
