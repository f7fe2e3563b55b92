use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};
use crate::mesh::IndexedMesh;
use crate::{binary, text};

/// File extension shared by both encodings.
pub const EXTENSION: &str = "smf";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    #[serde(alias = "txt")]
    Text,
    #[serde(alias = "bin")]
    Binary,
}

impl Format {
    /// Guesses the encoding of `bytes` from its leading header.
    pub fn detect(bytes: &[u8]) -> Option<Format> {
        if bytes.starts_with(&binary::MAGIC) {
            Some(Format::Binary)
        } else if bytes.starts_with(text::HEADER.as_bytes()) {
            Some(Format::Text)
        } else {
            None
        }
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_ref() {
            "text" | "txt" => Ok(Format::Text),
            "binary" | "bin" => Ok(Format::Binary),
            _ => Err(FormatError::UnsupportedFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Text => f.write_str("text"),
            Format::Binary => f.write_str("binary"),
        }
    }
}

pub fn serialize(mesh: &IndexedMesh, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Text => Ok(text::to_string(mesh).into_bytes()),
        Format::Binary => binary::to_bytes(mesh),
    }
}

pub fn write<W: Write>(mesh: &IndexedMesh, format: Format, mut writer: W) -> Result<()> {
    match format {
        Format::Text => writer.write_all(text::to_string(mesh).as_bytes())?,
        Format::Binary => binary::write(mesh, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

pub fn deserialize(bytes: &[u8], format: Format) -> Result<IndexedMesh> {
    match format {
        Format::Text => text::read(std::str::from_utf8(bytes)?),
        Format::Binary => binary::read(bytes),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mesh::Vertex;

    #[test]
    fn test_from_str() -> Result<()> {
        assert_eq!("text".parse::<Format>()?, Format::Text);
        assert_eq!("TXT".parse::<Format>()?, Format::Text);
        assert_eq!("Binary".parse::<Format>()?, Format::Binary);
        assert_eq!("bin".parse::<Format>()?, Format::Binary);
        assert!(matches!(
            "fbx".parse::<Format>(),
            Err(FormatError::UnsupportedFormat(name)) if name == "fbx"
        ));
        Ok(())
    }

    #[test]
    fn test_detect() -> Result<()> {
        let mut mesh = IndexedMesh::new();
        mesh.push_triangle([Vertex::default(); 3])?;

        for format in [Format::Text, Format::Binary] {
            let bytes = serialize(&mesh, format)?;
            assert_eq!(Format::detect(&bytes), Some(format));
            assert_eq!(deserialize(&bytes, format)?, mesh);
        }
        assert_eq!(Format::detect(b"solid cube"), None);

        Ok(())
    }

    #[test]
    fn test_deserialize_invalid_utf8() {
        let bytes = b"#SimpleModelv1\n0 0\n\xFF\xFE";
        assert!(matches!(
            deserialize(bytes, Format::Text),
            Err(FormatError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_write_matches_serialize() -> Result<()> {
        let mut mesh = IndexedMesh::new();
        mesh.push_triangle([Vertex::default(); 3])?;

        for format in [Format::Text, Format::Binary] {
            let mut out = Vec::new();
            write(&mesh, format, &mut out)?;
            assert_eq!(out, serialize(&mesh, format)?);
        }

        Ok(())
    }
}
