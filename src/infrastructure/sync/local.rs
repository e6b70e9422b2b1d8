//! Local working tree, used instead of a clone when `--source` is given.

use std::path::{Path, PathBuf};

use crate::error::{HoistError, HoistResult};

/// Resolve `--source` to an absolute directory.
pub fn resolve_local_tree(path: &Path) -> HoistResult<PathBuf> {
    let resolved = std::fs::canonicalize(path)
        .map_err(|e| HoistError::input("source", format!("{}: {e}", path.display())))?;
    if !resolved.is_dir() {
        return Err(HoistError::input(
            "source",
            format!("{} is not a directory", path.display()),
        ));
    }
    Ok(resolved)
}
