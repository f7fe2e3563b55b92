use anyhow::{anyhow, Context, Result};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

pub fn file_name(path: &Path) -> Result<&str> {
    path.file_stem()
        .ok_or_else(|| anyhow!("No file stem found: {}", path.display()))?
        .to_str()
        .ok_or_else(|| anyhow!("Can't convert file stem to string: {}", path.display()))
}

/// `dir/model.obj` -> `dir/model.<extension>`
pub fn sibling(path: &Path, extension: &str) -> Result<PathBuf> {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(dir.join(format!("{}.{}", file_name(path)?, extension)))
}

pub fn write_file(target: &Path, data: &[u8]) -> Result<()> {
    let mut file = File::create(target)
        .with_context(|| format!("Could not create file: {}", target.display()))?;
    file.write_all(data)
        .with_context(|| format!("Could not write data to file: {}", target.display()))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_file_name() -> Result<()> {
        assert_eq!(file_name(Path::new("models/cube.obj"))?, "cube");
        assert_eq!(
            sibling(Path::new("models/cube.obj"), "toml")?,
            PathBuf::from("models/cube.toml")
        );
        assert!(file_name(Path::new("/")).is_err());
        Ok(())
    }
}
