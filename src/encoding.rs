//! Byte order mark detection for the files being rewritten.
//!
//! Visual Studio commonly saves AssemblyInfo files with a UTF-8 BOM and
//! occasionally as UTF-16. Files are written back in the encoding they were
//! read in.

use std::io::{Error, ErrorKind};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    fn bom(&self) -> &'static [u8] {
        match self {
            TextEncoding::Utf8 => &[],
            TextEncoding::Utf8Bom => UTF8_BOM,
            TextEncoding::Utf16Le => UTF16_LE_BOM,
            TextEncoding::Utf16Be => UTF16_BE_BOM,
        }
    }
}

/// Decodes `bytes`, picking the encoding from its byte order mark.
///
/// Without a BOM the text has to be valid UTF-8.
pub fn decode(bytes: &[u8]) -> std::io::Result<(TextEncoding, String)> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return Ok((TextEncoding::Utf8Bom, utf8(rest)?));
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return Ok((TextEncoding::Utf16Le, utf16(rest, u16::from_le_bytes)?));
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return Ok((TextEncoding::Utf16Be, utf16(rest, u16::from_be_bytes)?));
    }
    Ok((TextEncoding::Utf8, utf8(bytes)?))
}

pub fn encode(encoding: TextEncoding, text: &str) -> Vec<u8> {
    let mut bytes = encoding.bom().to_vec();
    match encoding {
        TextEncoding::Utf8 | TextEncoding::Utf8Bom => bytes.extend_from_slice(text.as_bytes()),
        TextEncoding::Utf16Le => bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes)),
        TextEncoding::Utf16Be => bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes)),
    }
    bytes
}

fn utf8(bytes: &[u8]) -> std::io::Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| Error::new(ErrorKind::InvalidData, e))
}

fn utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> std::io::Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::new(ErrorKind::InvalidData, "odd number of bytes in UTF-16 text"));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| Error::new(ErrorKind::InvalidData, e))
}
