//! Save-game encodings

use crate::record::SaveGame;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Encoding of a save file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    /// RON format (Rust Object Notation), human readable
    Ron,
    /// Compact bincode payload
    Binary,
    /// JSON format (requires serde_json feature)
    Json,
}

impl SaveFormat {
    /// Pick a format from a file extension, defaulting to binary
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("ron") => SaveFormat::Ron,
            Some("json") => SaveFormat::Json,
            _ => SaveFormat::Binary,
        }
    }
}

impl SaveGame {
    /// Encode in the given format
    pub fn encode(&self, format: SaveFormat) -> Result<Vec<u8>> {
        match format {
            SaveFormat::Ron => self.to_ron().map(String::into_bytes),
            SaveFormat::Binary => self.to_bytes(),
            SaveFormat::Json => self.to_json().map(String::into_bytes),
        }
    }

    /// Decode from the given format
    pub fn decode(bytes: &[u8], format: SaveFormat) -> Result<Self> {
        match format {
            SaveFormat::Binary => Self::from_bytes(bytes),
            SaveFormat::Ron | SaveFormat::Json => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                if format == SaveFormat::Ron {
                    Self::from_ron(text)
                } else {
                    Self::from_json(text)
                }
            }
        }
    }

    /// Export to RON format
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Export to the compact binary format
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Load from the binary format; any decode failure is corruption
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Corrupt(e.to_string()))
    }

    /// Export to JSON format
    #[cfg(feature = "serde_json")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    #[cfg(not(feature = "serde_json"))]
    pub fn to_json(&self) -> Result<String> {
        Err(Error::UnsupportedFormat(
            "JSON saves require the 'serde_json' feature".to_string(),
        ))
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Serialization(e.to_string()))
    }

    #[cfg(not(feature = "serde_json"))]
    pub fn from_json(_text: &str) -> Result<Self> {
        Err(Error::UnsupportedFormat(
            "JSON saves require the 'serde_json' feature".to_string(),
        ))
    }

    /// Write to a file, choosing the format from its extension
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.encode(SaveFormat::from_path(path))?)?;
        Ok(())
    }

    /// Read a file written by [`SaveGame::write_file`]
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Self::decode(&bytes, SaveFormat::from_path(path))
    }
}
