use std::fs;
use std::path::Path;
use log::debug;

use crate::errors::{AppError, AppResult};

// @module: File and directory utilities

// @const: UTF-8 byte order mark
const UTF8_BOM: char = '\u{feff}';

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> AppResult<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a whole file as UTF-8 text.
    ///
    /// A leading byte order mark is dropped. Any open or decode failure is
    /// reported as `AppError::UnreadableFile`; the handle is closed before
    /// this returns on every path.
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> AppResult<String> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| AppError::UnreadableFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let text = String::from_utf8(bytes).map_err(|e| AppError::UnreadableFile {
            path: path.to_path_buf(),
            reason: format!("invalid UTF-8: {}", e.utf8_error()),
        })?;

        debug!("Read {} bytes from {:?}", text.len(), path);

        match text.strip_prefix(UTF8_BOM) {
            Some(stripped) => Ok(stripped.to_string()),
            None => Ok(text),
        }
    }

    /// Write a string to a file, replacing any existing content
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> AppResult<()> {
        let path = path.as_ref();

        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(path, content)
            .map_err(|e| AppError::File(format!("Failed to write to file {:?}: {}", path, e)))
    }
}
