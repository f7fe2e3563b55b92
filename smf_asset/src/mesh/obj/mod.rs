pub mod builder;
pub mod meta;
pub mod parser;

use anyhow::{Context, Result};
use log::info;
use smf_format::{Format, IndexedMesh};
use std::path::{Path, PathBuf};

use crate::utils;

pub use self::builder::{FlattenError, SourceFace, SourceList, SourceMesh, SourceVertexRef};
pub use self::meta::ObjMeta;
pub use self::parser::{parse, parse_lines, Directive, FaceLayout, ParseErrorKind, ParserError};

pub fn flatten(mesh: &SourceMesh) -> Result<IndexedMesh, FlattenError> {
    mesh.flatten()
}

fn load(path: &Path) -> Result<IndexedMesh> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read model: {}", path.display()))?;
    let mesh = parse(&text).with_context(|| format!("Could not parse {}", path.display()))?;
    Ok(mesh.flatten()?)
}

/// Parse meta from a file called `<model>.toml`, or alternatively from a folder scoped meta file
/// named `obj.toml`, or else use the default meta
fn parse_meta(path: &Path) -> Result<ObjMeta> {
    let dir = path
        .parent()
        .with_context(|| format!("Path terminates in root or prefix: {}", path.display()))?;

    let model_meta = utils::sibling(path, "toml")?;
    if model_meta.is_file() {
        return ObjMeta::parse(&model_meta);
    }

    let folder_meta = dir.join("obj.toml");
    if folder_meta.is_file() {
        return ObjMeta::parse(&folder_meta);
    }

    Ok(ObjMeta::default())
}

/// Converts one `.obj` file into `<output_dir>/<name>.smf` and returns the written path.
pub fn process(path: &Path, output_dir: &Path, format: Format) -> Result<PathBuf> {
    info!("Processing Wavefront `.obj`-file: `{}`", path.display());

    let format = parse_meta(path)?.format_or(format);
    let mesh = load(path)?;
    let data = smf_format::serialize(&mesh, format).context("Could not serialize mesh")?;

    let target = output_dir.join(format!(
        "{}.{}",
        utils::file_name(path)?,
        smf_format::format::EXTENSION
    ));
    utils::write_file(&target, &data)?;
    info!(
        "Wrote {} triangles as {} to `{}`",
        mesh.triangle_count(),
        format,
        target.display()
    );

    Ok(target)
}
