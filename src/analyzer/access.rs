//! Accessibility check: can this path be opened and read as a regular file?

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::ClassifiedError;

/// Check that `path` exists, is not a directory, and can be opened for read.
///
/// Every failure is classified as [`ClassifiedError::FileNotFound`] with the underlying cause.
/// The handle is dropped before returning, whatever the outcome.
pub fn check_accessible(path: &str) -> Result<(), ClassifiedError> {
    let meta = fs::metadata(Path::new(path))
        .map_err(|e| ClassifiedError::file_not_found(path, e))?;

    if meta.is_dir() {
        return Err(ClassifiedError::file_not_found(
            path,
            io::Error::new(io::ErrorKind::IsADirectory, "path is a directory"),
        ));
    }

    let _file = File::open(path).map_err(|e| ClassifiedError::file_not_found(path, e))?;
    Ok(())
}
