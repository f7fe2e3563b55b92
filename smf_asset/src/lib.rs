//! Converts Wavefront `.obj` models into the Simple Model Format.
//!
//! The pipeline runs in three steps, each producing an immutable value for the next one:
//! [`parse`] the source text into a [`SourceMesh`], [`flatten`] it into an [`IndexedMesh`], and
//! [`serialize`] that into text or binary SMF.

pub mod mesh;
pub mod utils;

use log::info;

pub use mesh::obj::{
    flatten, parse, parse_lines, FlattenError, ParseErrorKind, ParserError, SourceFace,
    SourceMesh, SourceVertexRef,
};
pub use smf_format::{serialize, Format, FormatError, IndexedMesh};

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("Failed to parse model: {0}")]
    Parse(#[from] ParserError),
    #[error("Failed to flatten model: {0}")]
    Flatten(#[from] FlattenError),
    #[error("Failed to serialize model: {0}")]
    Format(#[from] FormatError),
}

/// Runs the whole pipeline on the text of an `.obj` model.
pub fn convert(text: &str, format: Format) -> Result<Vec<u8>, ConvertError> {
    let source = parse(text)?;
    let mesh = source.flatten()?;
    info!(
        "Converted {} faces into {} vertices",
        source.faces().len(),
        mesh.vertex_count()
    );
    Ok(serialize(&mesh, format)?)
}
