//! File and directory helpers for the data directory: listing, lookup by glob pattern,
//! timestamped backups, and size accounting.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{info, warn};
use walkdir::WalkDir;

use crate::error::{DataLabError, Result};

/// Sorted file and directory names directly inside a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Regular files.
    pub files: Vec<String>,
    /// Subdirectories.
    pub directories: Vec<String>,
}

/// Metadata about one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub name: String,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Local>>,
    pub is_file: bool,
    pub is_directory: bool,
    /// Extension including the leading dot, or empty.
    pub extension: String,
}

impl FileInfo {
    /// Size in KiB.
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

/// List the contents of `dir`. A missing directory yields an empty listing.
pub fn list_directory_contents(dir: impl AsRef<Path>) -> Result<DirectoryListing> {
    let dir = dir.as_ref();
    if !dir.exists() {
        warn!("directory does not exist: {}", dir.display());
        return Ok(DirectoryListing::default());
    }

    let mut listing = DirectoryListing::default();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type()?;
        if file_type.is_file() {
            listing.files.push(name);
        } else if file_type.is_dir() {
            listing.directories.push(name);
        }
    }
    listing.files.sort();
    listing.directories.sort();
    Ok(listing)
}

/// Metadata for `path`, or `None` if it does not exist.
pub fn file_info(path: impl AsRef<Path>) -> Result<Option<FileInfo>> {
    let path = path.as_ref();
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Ok(Some(FileInfo {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        size_bytes: meta.len(),
        modified: meta.modified().ok().map(DateTime::<Local>::from),
        is_file: meta.is_file(),
        is_directory: meta.is_dir(),
        extension: path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default(),
    }))
}

/// Files under `dir` matching a glob `pattern` such as `*.json` or `**/*.csv`. Sorted.
pub fn find_files_by_pattern(pattern: &str, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let full = dir.as_ref().join(pattern);
    let mut matches: Vec<PathBuf> = glob::glob(&full.to_string_lossy())?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("skipping unreadable path: {e}");
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    matches.sort();
    Ok(matches)
}

/// Copy `source` to `destination`.
///
/// When `create_backup` is set and `destination` already exists, it is first copied to
/// `<stem>_backup_<timestamp><ext>` next to itself.
pub fn copy_file(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    create_backup: bool,
) -> Result<PathBuf> {
    let source = source.as_ref();
    let destination = destination.as_ref();
    if !source.exists() {
        return Err(DataLabError::FileNotFound {
            path: source.to_path_buf(),
        });
    }

    if create_backup && destination.exists() {
        let parent = destination.parent().unwrap_or_else(|| Path::new("."));
        let backup = parent.join(backup_name(destination, Local::now()));
        fs::copy(destination, &backup)?;
        info!("created backup: {}", backup.display());
    }

    fs::copy(source, destination)?;
    info!("copied {} to {}", source.display(), destination.display());
    Ok(destination.to_path_buf())
}

/// Copy `file` into `backup_dir` (created if needed) under a timestamped name.
pub fn create_backup(file: impl AsRef<Path>, backup_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let file = file.as_ref();
    if !file.exists() {
        return Err(DataLabError::FileNotFound {
            path: file.to_path_buf(),
        });
    }

    let backup_dir = ensure_directory_exists(backup_dir)?;
    let backup = backup_dir.join(backup_name(file, Local::now()));
    fs::copy(file, &backup)?;
    info!("backup created: {}", backup.display());
    Ok(backup)
}

/// Total size in bytes of every file below `dir`. Unreadable entries are skipped.
pub fn directory_size(dir: impl AsRef<Path>) -> u64 {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Delete all but the `keep` most recently modified `*_backup_*` files in `backup_dir`.
///
/// Returns the deleted paths. A missing directory deletes nothing.
pub fn cleanup_old_backups(backup_dir: impl AsRef<Path>, keep: usize) -> Result<Vec<PathBuf>> {
    let backup_dir = backup_dir.as_ref();
    if !backup_dir.exists() {
        return Ok(Vec::new());
    }

    let mut backups = Vec::new();
    for path in find_files_by_pattern("*_backup_*", backup_dir)? {
        let modified = fs::metadata(&path)?.modified()?;
        backups.push((path, modified));
    }
    // Newest first; name breaks ties so the order is stable within one timestamp.
    backups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let mut deleted = Vec::new();
    for (path, _) in backups.into_iter().skip(keep) {
        fs::remove_file(&path)?;
        info!("deleted old backup: {}", path.display());
        deleted.push(path);
    }
    Ok(deleted)
}

/// Create `dir` (and parents) if missing.
pub fn ensure_directory_exists(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

fn backup_name(file: &Path, at: DateTime<Local>) -> String {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{stem}_backup_{}{ext}", at.format("%Y%m%d_%H%M%S"))
}
