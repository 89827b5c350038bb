//! Text encodings used to turn document text into file bytes and back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::{IniError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8 without a byte order mark. A BOM is still accepted when decoding.
    #[default]
    Utf8,
    /// UTF-8 written with a byte order mark.
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
}

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Bom => "utf-8-bom",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Latin1 => "latin1",
        }
    }

    /// Byte order mark written ahead of non-empty content.
    pub fn preamble(self) -> &'static [u8] {
        match self {
            Self::Utf8Bom => UTF8_BOM,
            Self::Utf16Le => UTF16LE_BOM,
            Self::Utf16Be => UTF16BE_BOM,
            Self::Utf8 | Self::Latin1 => &[],
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Utf8 | Self::Utf8Bom => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                String::from_utf8(body.to_vec()).map_err(|err| self.decode_error(err))
            }
            Self::Utf16Le => {
                let body = bytes.strip_prefix(UTF16LE_BOM).unwrap_or(bytes);
                self.decode_utf16(body, u16::from_le_bytes)
            }
            Self::Utf16Be => {
                let body = bytes.strip_prefix(UTF16BE_BOM).unwrap_or(bytes);
                self.decode_utf16(body, u16::from_be_bytes)
            }
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Encode `text`, prefixed with [`TextEncoding::preamble`] unless empty.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let mut out = self.preamble().to_vec();
        match self {
            Self::Utf8 | Self::Utf8Bom => out.extend_from_slice(text.as_bytes()),
            Self::Utf16Le => text
                .encode_utf16()
                .for_each(|unit| out.extend_from_slice(&unit.to_le_bytes())),
            Self::Utf16Be => text
                .encode_utf16()
                .for_each(|unit| out.extend_from_slice(&unit.to_be_bytes())),
            Self::Latin1 => {
                for c in text.chars() {
                    let byte = u8::try_from(u32::from(c)).map_err(|_| IniError::Encode {
                        encoding: self.label(),
                        reason: format!("character {c:?} is outside latin1"),
                    })?;
                    out.push(byte);
                }
            }
        }
        Ok(out)
    }

    fn decode_utf16(self, bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
        if bytes.len() % 2 != 0 {
            return Err(self.decode_error("odd number of bytes"));
        }
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| unit([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).map_err(|err| self.decode_error(err))
    }

    fn decode_error(self, reason: impl fmt::Display) -> IniError {
        IniError::Decode {
            encoding: self.label(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = IniError;

    fn from_str(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-8-bom" | "utf8-bom" => Ok(Self::Utf8Bom),
            "utf-16le" | "utf-16" | "utf16le" | "unicode" => Ok(Self::Utf16Le),
            "utf-16be" | "utf16be" => Ok(Self::Utf16Be),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            _ => Err(IniError::invalid_argument(
                "encoding",
                format!("unknown label '{label}'"),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for TextEncoding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
