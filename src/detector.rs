use std::path::{Path, PathBuf};

use crate::license::catalog::is_eligible;

/// List the recognized license files directly inside `dir`, sorted by name.
pub fn find_license_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_eligible(path))
        .collect();
    files.sort();
    Ok(files)
}
