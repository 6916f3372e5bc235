//! Reader for the Sphinx v2 object-inventory format (`objects.inv`).
//!
//! The payload starts with four `#` header lines (format version, project,
//! version, compression marker) followed by a zlib stream of
//! `name domain:role priority location dispname` records.

use flate2::read::ZlibDecoder;
use regex::Regex;
use std::io::Read;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Unsupported inventory version: {0}")]
    UnsupportedVersion(String),

    #[error("Malformed inventory header")]
    MalformedHeader,

    #[error("Failed to decompress inventory: {0}")]
    Decompress(#[from] std::io::Error),
}

static ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(.+?)\s+(\S+):(\S+)\s+(-?\d+)\s+(\S+)\s+(.*)$").unwrap()
});

/// A parsed object inventory: ordered symbol name → absolute URL pairs.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub project: String,
    pub version: String,
    pub entries: Vec<(String, String)>,
}

fn split_header(data: &[u8]) -> Result<(Vec<String>, &[u8]), InventoryError> {
    let mut rest = data;
    let mut lines = Vec::with_capacity(4);
    for _ in 0..4 {
        let pos = rest
            .iter()
            .position(|&b| b == b'\n')
            .ok_or(InventoryError::MalformedHeader)?;
        lines.push(String::from_utf8_lossy(&rest[..pos]).trim().to_string());
        rest = &rest[pos + 1..];
    }
    Ok((lines, rest))
}

fn header_value(line: &str) -> String {
    line.splitn(3, ' ').nth(2).unwrap_or("").to_string()
}

/// Parse a raw `objects.inv` payload into symbol → URL pairs rooted at
/// `base_url`. Entry order follows the inventory itself.
pub fn parse_object_inv(data: &[u8], base_url: &str) -> Result<Inventory, InventoryError> {
    let (header, compressed) = split_header(data)?;

    if header[0].rsplit(' ').next() != Some("2") {
        return Err(InventoryError::UnsupportedVersion(header[0].clone()));
    }
    if !header[3].contains("zlib") {
        return Err(InventoryError::MalformedHeader);
    }

    let project = header_value(&header[1]);
    let version = header_value(&header[2]);

    let mut text = String::new();
    ZlibDecoder::new(compressed).read_to_string(&mut text)?;

    let base = base_url.trim_end_matches('/');
    let mut entries = Vec::new();

    for captures in ENTRY_REGEX.captures_iter(&text) {
        let name = &captures[1];
        let mut location = captures[5].to_string();
        let dispname = &captures[6];

        // A trailing `$` is shorthand for the object's own name.
        if let Some(stripped) = location.strip_suffix('$') {
            location = format!("{stripped}{name}");
        }

        let key = if dispname == "-" { name } else { dispname };
        entries.push((key.to_string(), format!("{base}/{location}")));
    }

    Ok(Inventory {
        project,
        version,
        entries,
    })
}
