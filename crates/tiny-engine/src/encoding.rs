//! Text encodings accepted for script files and the `read`/`write` commands.

use crate::error::EngineError;

pub const DEFAULT_ENCODING: &str = "utf-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Ascii,
}

impl Encoding {
    /// Resolves an encoding label. Labels are case-insensitive.
    pub fn from_label(label: &str) -> Result<Self, EngineError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            _ => Err(EngineError::UnsupportedEncoding(label.to_string())),
        }
    }

    pub fn decode(&self, bytes: Vec<u8>) -> Result<String, EngineError> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes).map_err(|e| EngineError::Decode(e.to_string())),
            Encoding::Ascii => {
                if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
                    return Err(EngineError::Decode(format!("non-ascii byte at offset {pos}")));
                }
                String::from_utf8(bytes).map_err(|e| EngineError::Decode(e.to_string()))
            }
        }
    }

    pub fn encode<'a>(&self, text: &'a str) -> Result<&'a [u8], EngineError> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes()),
            Encoding::Ascii => {
                if let Some(pos) = text.bytes().position(|b| !b.is_ascii()) {
                    return Err(EngineError::Decode(format!("non-ascii character at offset {pos}")));
                }
                Ok(text.as_bytes())
            }
        }
    }
}
