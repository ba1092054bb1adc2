use std::{fs::File, io::Read, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Error unless a regular file exists at `path`.
pub(crate) fn require_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Path exists but is not a file: {}", path.display());
    }
    Ok(())
}

/// Files whose contents make up a source: the file itself plus, for a
/// shapefile, the `.dbf` attribute table beside it.
pub(crate) fn source_files(path: &Path) -> Vec<PathBuf> {
    let mut files = vec![path.to_path_buf()];
    let is_shp = path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("shp"));
    if is_shp {
        let dbf = path.with_extension("dbf");
        if dbf.is_file() { files.push(dbf) }
    }
    files
}

/// Hex SHA-256 digest over the concatenated contents of `paths`.
pub(crate) fn sha256_files(paths: &[PathBuf]) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 1 << 16];
    for path in paths {
        let mut file = File::open(path)
            .with_context(|| format!("open for hash {}", path.display()))?;
        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
    }
    Ok(hex::encode(hasher.finalize()))
}
