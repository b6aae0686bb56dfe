//! Small helpers for the JSON and text files that make up the data root
//!
//! Absent files are reported as `Ok(None)` so callers can treat "file does not
//! exist" as data rather than as a fault. Every other I/O or decode failure
//! propagates.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use tracing::debug;

use crate::Result;

/// Read a UTF-8 text file, returning `None` if it does not exist
pub fn read_text_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read and decode a JSON file, returning `None` if it does not exist
pub fn read_json_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match read_text_optional(path)? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// Encode a value as two-space indented JSON
///
/// Non-ASCII text is written verbatim, not escaped.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write a value as pretty JSON, replacing any existing file
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    fs::write(path, to_pretty_json(value)?)?;
    Ok(())
}

/// Write a value as pretty JSON only if `path` does not exist yet
///
/// Returns `Ok(false)` when the file already exists; the existing file is left
/// untouched. The body goes to a temporary file in the same directory first
/// and is then linked into place without replacing anything, so `path` never
/// exists with partial contents, even if the write fails.
pub fn write_json_new<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<bool> {
    let body = to_pretty_json(value)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(body.as_bytes())?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    match temp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
            debug!("{} already exists, not overwriting", path.display());
            Ok(false)
        }
        Err(e) => Err(e.error.into()),
    }
}
