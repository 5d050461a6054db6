//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a UTF-8 file with standardized error handling.
///
/// Invalid UTF-8 is reported as an I/O error like any other read failure.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Replace a file's content atomically (write to .tmp, then rename).
///
/// The temp file takes the target's permissions before the rename, and a
/// read-only target is refused rather than replaced. Symlinks are resolved so
/// the link itself survives.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let io_err = |e: std::io::Error, step: &str| {
        Error::internal_io(e.to_string(), Some(format!("{} ({})", operation, step)))
    };

    let permissions = match fs::metadata(&target) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(io_err(e, "stat")),
    };
    if permissions.as_ref().is_some_and(|p| p.readonly()) {
        return Err(Error::internal_io(
            "Permission denied: file is read-only",
            Some(operation.to_string()),
        ));
    }

    let (parent, filename) = match (target.parent(), target.file_name()) {
        (Some(parent), Some(filename)) => (parent, filename),
        _ => {
            return Err(Error::internal_io(
                format!("Invalid path: {}", path.display()),
                Some(operation.to_string()),
            ))
        }
    };
    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    let staged = fs::write(&tmp_path, content)
        .map_err(|e| io_err(e, "write temp"))
        .and_then(|()| match permissions {
            Some(p) => fs::set_permissions(&tmp_path, p).map_err(|e| io_err(e, "permissions")),
            None => Ok(()),
        })
        .and_then(|()| fs::rename(&tmp_path, &target).map_err(|e| io_err(e, "rename")));

    if staged.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    staged
}
