use anyhow::{Context, Result};
use serde::Deserialize;
use smf_format::Format;
use std::path::Path;

/// Per-model conversion settings, read from `<model>.toml` or a folder scoped `obj.toml`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjMeta {
    /// Overrides the output format chosen on the command line.
    pub format: Option<Format>,
}

impl ObjMeta {
    pub fn parse(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Could not read meta file: {}", path.display()))?;
        let meta: Self = toml::from_slice(&data)
            .with_context(|| format!("Invalid meta file: {}", path.display()))?;
        Ok(meta)
    }

    pub fn format_or(&self, default: Format) -> Format {
        self.format.unwrap_or(default)
    }
}
