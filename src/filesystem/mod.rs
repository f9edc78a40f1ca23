use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Represents errors that can occur during filesystem operations.
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// Wrapper for standard IO errors.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Error when a source path expected to be a directory is not one.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Options for removing files or directories.
pub struct RemoveOptions {
    /// If true, removes directories recursively.
    pub recursive: bool,
}

impl Default for RemoveOptions {
    fn default() -> Self {
        Self { recursive: false }
    }
}

/// Checks if a directory exists at the given path.
pub fn dir_exists<P: AsRef<Path>>(dir: P) -> bool {
    dir.as_ref().is_dir()
}

/// Checks if a file exists at the given path.
pub fn file_exists<P: AsRef<Path>>(file: P) -> bool {
    file.as_ref().is_file()
}

/// Creates a directory if it does not exist.
///
/// # Arguments
///
/// * `dir` - Path to the directory to create.
/// * `recursive` - If true, creates parent directories as needed.
///
/// # Errors
///
/// Returns `FilesystemError` if the directory cannot be created.
pub fn create_if_not_exists<P: AsRef<Path>>(dir: P, recursive: bool) -> Result<(), FilesystemError> {
    let path = dir.as_ref();
    if path.exists() {
        return Ok(());
    }
    if recursive {
        fs::create_dir_all(path)?;
    } else {
        fs::create_dir(path)?;
    }
    Ok(())
}

/// Copies a single file, overwriting any existing destination and creating
/// the destination's parent directories as needed.
///
/// # Returns
///
/// The number of bytes copied.
pub fn copy_file<P: AsRef<Path>>(src: P, dst: P) -> Result<u64, FilesystemError> {
    if let Some(parent) = dst.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(fs::copy(src, dst)?)
}

/// Recursively copies the contents of `src` into `dst`, creating `dst` if
/// needed. Files already present in `dst` are overwritten; files only
/// present in `dst` are left alone.
///
/// # Errors
///
/// Returns `FilesystemError::NotADirectory` if `src` is not a directory, or
/// an IO error from the underlying copy.
pub fn copy_tree<P: AsRef<Path>>(src: P, dst: P) -> Result<(), FilesystemError> {
    let src = src.as_ref();
    let dst = dst.as_ref();
    if !src.is_dir() {
        return Err(FilesystemError::NotADirectory(src.to_path_buf()));
    }
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

/// Removes a file or directory at the given path, with options. A path that
/// does not exist is left alone.
///
/// # Errors
///
/// Returns `FilesystemError` if the removal fails.
pub fn remove_if_exists<P: AsRef<Path>>(path: P, options: RemoveOptions) -> Result<(), FilesystemError> {
    let p = path.as_ref();
    if p.is_dir() {
        if options.recursive {
            fs::remove_dir_all(p)?;
        } else {
            fs::remove_dir(p)?;
        }
    } else if p.is_file() {
        fs::remove_file(p)?;
    }
    Ok(())
}

/// Counts the files (not directories) under `dir`, recursively. A missing
/// directory counts as zero.
pub fn count_files<P: AsRef<Path>>(dir: P) -> u64 {
    let entries = match fs::read_dir(dir.as_ref()) {
        Ok(entries) => entries,
        Err(_) => return 0,
    };
    let mut count = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            count += count_files(&path);
        } else {
            count += 1;
        }
    }
    count
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// # Returns
///
/// Paths without a leading `~` convert unchanged. A `~` that cannot be
/// resolved (no home directory, or `~user` forms) yields an empty path.
pub fn expand_home(path: &str) -> PathBuf {
    let Some(rest) = path.strip_prefix('~') else {
        return PathBuf::from(path);
    };
    let Some(home) = dirs::home_dir() else {
        return PathBuf::new();
    };
    if rest.is_empty() {
        return home;
    }
    match rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
        Some(tail) => home.join(tail),
        None => PathBuf::new(),
    }
}
