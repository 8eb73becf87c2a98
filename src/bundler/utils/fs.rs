//! File system utilities for staging.
//!
//! Provides safe file operations with automatic directory creation,
//! symlink preservation, and comprehensive error handling. All operations
//! are synchronous: the build is offset-ordered and never overlaps I/O.

use crate::bundler::error::{ErrorExt, Result};
use std::{fs, io, path::Path};

/// Creates all of the directories of the specified path, erasing it first
/// if specified.
pub fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path)?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path).fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        crate::bail!("{from:?} does not exist");
    }
    if !from.is_file() {
        crate::bail!("{from:?} is not a file");
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir).fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).fs_context("copying file", to)?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them.
/// Fails if the source path is not a directory or doesn't exist.
pub fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        crate::bail!("{from:?} does not exist");
    }
    if !from.is_dir() {
        crate::bail!("{from:?} is not a Directory");
    }

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).fs_context("creating destination directory", parent)?;
    }

    for entry in walkdir::WalkDir::new(from) {
        let entry = entry
            .map_err(|e| crate::bundler::Error::GenericError(format!("walking {from:?}: {e}")))?;
        debug_assert!(entry.path().starts_with(from));
        let rel_path = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| crate::bundler::Error::GenericError(format!("relativizing path: {e}")))?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_symlink() {
            let target =
                fs::read_link(entry.path()).fs_context("reading symlink", entry.path())?;
            symlink(&target, &dest_path).fs_context("creating symlink", &dest_path)?;
        } else if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
        } else {
            fs::copy(entry.path(), &dest_path).fs_context("copying file", &dest_path)?;
        }
    }

    Ok(())
}

/// Makes a symbolic link.
#[cfg(unix)]
fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link.
#[cfg(windows)]
fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if src.is_dir() {
        std::os::windows::fs::symlink_dir(src, dst)
    } else {
        std::os::windows::fs::symlink_file(src, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_dir_preserves_structure() {
        let src = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("sub")).unwrap();
        fs::write(src.path().join("a.bin"), b"a").unwrap();
        fs::write(src.path().join("sub").join("b.bin"), b"b").unwrap();

        let dst = tempfile::tempdir().unwrap();
        let target = dst.path().join("copy");
        copy_dir(src.path(), &target).unwrap();

        assert_eq!(fs::read(target.join("a.bin")).unwrap(), b"a");
        assert_eq!(fs::read(target.join("sub").join("b.bin")).unwrap(), b"b");
    }

    #[test]
    fn copy_missing_source_fails() {
        let dst = tempfile::tempdir().unwrap();
        assert!(copy_dir(Path::new("/no/such/dir"), dst.path()).is_err());
        assert!(copy_file(Path::new("/no/such/file"), &dst.path().join("x")).is_err());
    }

    #[test]
    fn remove_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("gone");
        assert!(remove_dir_all(&target).is_ok());
        fs::create_dir(&target).unwrap();
        assert!(remove_dir_all(&target).is_ok());
        assert!(!target.exists());
    }

    #[test]
    fn create_dir_all_erase_clears_contents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("stage");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("stale.bin"), b"old").unwrap();

        create_dir_all(&target, true).unwrap();
        assert!(target.exists());
        assert!(!target.join("stale.bin").exists());
    }
}
