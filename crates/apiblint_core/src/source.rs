//! Document and ignore-file access.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::LinterError;

/// Maximum document size accepted for linting.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Reads documents and their sidecar ignore files.
///
/// Injected into the document builder so tests can serve content from
/// memory.
pub trait SourceReader: Send + Sync {
    /// Reads the full text of a document.
    fn read_document(&self, path: &Path) -> Result<String, LinterError>;

    /// Reads an ignore file. `Ok(None)` means the file does not exist.
    fn read_ignore_file(&self, path: &Path) -> Result<Option<String>, LinterError>;

    /// Replaces the contents of an ignore file.
    fn write_ignore_file(&self, path: &Path, contents: &str) -> Result<(), LinterError>;
}

/// [`SourceReader`] backed by the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSourceReader;

impl SourceReader for FsSourceReader {
    fn read_document(&self, path: &Path) -> Result<String, LinterError> {
        let metadata = fs::metadata(path).map_err(|e| {
            LinterError::file(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                e
            ))
        })?;

        if !metadata.is_file() {
            return Err(LinterError::file(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        if metadata.len() > MAX_FILE_SIZE {
            return Err(LinterError::file(format!(
                "File size exceeds limit of {} bytes: {}",
                MAX_FILE_SIZE,
                path.display()
            )));
        }

        fs::read_to_string(path)
            .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))
    }

    fn read_ignore_file(&self, path: &Path) -> Result<Option<String>, LinterError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LinterError::file(format!(
                "Failed to read ignore file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write_ignore_file(&self, path: &Path, contents: &str) -> Result<(), LinterError> {
        fs::write(path, contents).map_err(|e| {
            LinterError::file(format!(
                "Failed to write ignore file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Splits text into lines on `\r\n`, `\r` or `\n`.
///
/// Unlike [`str::lines`], a trailing line break produces a final empty line,
/// so `"a\n"` has two lines. Validators count that last line too.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&text[start..]);

    lines
}
