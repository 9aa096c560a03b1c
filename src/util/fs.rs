//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Copy `file_name` from `src_dir` into `dst_dir`, creating `dst_dir`.
///
/// Returns the destination path.
pub fn copy_into(src_dir: &Path, file_name: &str, dst_dir: &Path) -> Result<PathBuf> {
    let src = src_dir.join(file_name);
    let dst = dst_dir.join(file_name);

    ensure_dir(dst_dir)?;
    fs::copy(&src, &dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;

    Ok(dst)
}

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build/Release/generators/file.cmake");

        write_string(&path, "set(X ON)").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "set(X ON)");
    }

    #[test]
    fn test_copy_into() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("LICENSE.md"), "Apache").unwrap();

        let dst_dir = tmp.path().join("package/licenses");
        let dst = copy_into(tmp.path(), "LICENSE.md", &dst_dir).unwrap();

        assert_eq!(dst, dst_dir.join("LICENSE.md"));
        assert_eq!(fs::read_to_string(dst).unwrap(), "Apache");
    }

    #[test]
    fn test_copy_into_missing_source() {
        let tmp = TempDir::new().unwrap();
        let err = copy_into(tmp.path(), "LICENSE.md", &tmp.path().join("out")).unwrap_err();
        assert!(err.to_string().contains("LICENSE.md"));
    }
}
