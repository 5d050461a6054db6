//! File locator: lazily walk a directory tree for files with given extensions.

use glob_match::glob_match;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Which files the locator yields.
#[derive(Debug, Clone)]
pub struct FileFilter {
    /// Name suffixes including the leading dot (e.g. `.tsx`).
    suffixes: Vec<String>,
    /// Globs matched against the root-relative path with `/` separators.
    exclude: Vec<String>,
}

impl FileFilter {
    /// Build a filter from extensions written with or without a leading dot.
    pub fn new(extensions: &[String], exclude: &[String]) -> Result<Self> {
        let suffixes = extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect::<Result<Vec<_>>>()?;

        if suffixes.is_empty() {
            return Err(Error::validation_invalid_argument(
                "extensions",
                "At least one file extension is required",
                None,
                None,
            ));
        }

        Ok(Self {
            suffixes,
            exclude: exclude.to_vec(),
        })
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Case-sensitive suffix match on the file name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.iter().any(|pattern| glob_match(pattern, relative))
    }
}

fn normalize_extension(ext: &str) -> Result<String> {
    let trimmed = ext.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return Err(Error::validation_invalid_argument(
            "extensions",
            format!("Invalid file extension '{}'", ext),
            None,
            None,
        ));
    }
    Ok(format!(".{}", trimmed))
}

/// Recursive, lazy iterator over matching files under a root.
///
/// Directory entries are visited in name order. Unreadable subdirectories
/// are skipped; only a bad root is an error.
pub struct FileLocator {
    root: PathBuf,
    filter: FileFilter,
    pending_dirs: Vec<PathBuf>,
    pending_files: Vec<PathBuf>,
}

impl FileLocator {
    /// Open the root for walking. Fails if it is missing, not a directory, or unreadable.
    pub fn new(root: &Path, filter: FileFilter) -> Result<Self> {
        let root = std::path::absolute(root).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("resolve {}", root.display())))
        })?;

        let metadata = match fs::metadata(&root) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::root_not_found(root.display().to_string()));
            }
            Err(e) => {
                return Err(Error::internal_io(
                    e.to_string(),
                    Some(format!("stat {}", root.display())),
                ));
            }
        };

        if !metadata.is_dir() {
            return Err(Error::validation_invalid_argument(
                "root",
                format!("Not a directory: {}", root.display()),
                None,
                None,
            ));
        }

        let mut locator = Self {
            root: root.clone(),
            filter,
            pending_dirs: Vec::new(),
            pending_files: Vec::new(),
        };

        let entries = read_sorted(&root).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read {}", root.display())))
        })?;
        locator.push_entries(entries);

        Ok(locator)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Queue one directory's entries. Stacks are reversed so the smallest name pops first.
    fn push_entries(&mut self, entries: Vec<fs::DirEntry>) {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in entries {
            let path = entry.path();
            if self.filter.is_excluded(&self.relative(&path)) {
                continue;
            }

            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                dirs.push(path);
                continue;
            }

            // Links to directories are not followed; everything else is a file candidate.
            if file_type.is_symlink() && path.is_dir() {
                continue;
            }

            let name = entry.file_name();
            if self.filter.matches_name(&name.to_string_lossy()) {
                files.push(path);
            }
        }

        self.pending_files.extend(files.into_iter().rev());
        self.pending_dirs.extend(dirs.into_iter().rev());
    }
}

impl Iterator for FileLocator {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if let Some(file) = self.pending_files.pop() {
                return Some(file);
            }

            let dir = self.pending_dirs.pop()?;
            match read_sorted(&dir) {
                // Nested dirs land on top of the stack, so the walk is depth-first.
                Ok(entries) => self.push_entries(entries),
                Err(e) => {
                    log_status!("locate", "Skipping {}: {}", dir.display(), e);
                }
            }
        }
    }
}

fn read_sorted(dir: &Path) -> std::io::Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

/// Collect every matching file under `root`.
pub fn find_files(root: &Path, filter: FileFilter) -> Result<Vec<PathBuf>> {
    Ok(FileLocator::new(root, filter)?.collect())
}
