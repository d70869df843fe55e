//! Capability-scoped JSON document storage for Wanderfeed tooling.
//!
//! Catalogues, preference models and interaction events travel between CLI
//! invocations as JSON files. Paths are UTF-8 (`camino`) and every open goes
//! through `cap-std` directory handles rather than raw `std::fs` calls.
#![forbid(unsafe_code)]

use std::io::{self, BufReader, BufWriter, Write};
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised while reading or writing JSON documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be opened, created or written.
    #[error("failed to access {path:?}: {source}")]
    Io {
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// The file contents were not the expected JSON shape.
    #[error("failed to decode JSON in {path:?}: {source}")]
    Decode {
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// The value could not be encoded as JSON.
    #[error("failed to encode JSON for {path:?}: {source}")]
    Encode {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying encode failure.
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentError {
    fn io(path: &Utf8Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the failure was caused by a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Open a UTF-8 file path for reading using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Decode the JSON document at `path`.
///
/// # Errors
/// Returns [`DocumentError::Io`] when the file cannot be opened and
/// [`DocumentError::Decode`] when its contents do not match `T`.
pub fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, DocumentError> {
    let file = open_utf8_file(path).map_err(|source| DocumentError::io(path, source))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| DocumentError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode the JSON document at `path`, or return `None` when it does not
/// exist yet.
///
/// # Errors
/// As [`read_json`], except that a missing file is not an error.
pub fn read_json_if_exists<T: DeserializeOwned>(
    path: &Utf8Path,
) -> Result<Option<T>, DocumentError> {
    match read_json(path) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Encode `value` as pretty-printed JSON at `path`, creating parent
/// directories as needed and replacing any existing file.
///
/// # Errors
/// Returns [`DocumentError::Io`] when the file cannot be written and
/// [`DocumentError::Encode`] when `value` cannot be serialised.
pub fn write_json<T: Serialize + ?Sized>(path: &Utf8Path, value: &T) -> Result<(), DocumentError> {
    ensure_parent_dir(path).map_err(|source| DocumentError::io(path, source))?;
    let (dir, name) = open_dir_and_file(path).map_err(|source| DocumentError::io(path, source))?;
    let file = dir
        .create(name.as_str())
        .map_err(|source| DocumentError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| DocumentError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|source| DocumentError::io(path, source))
}

/// Resolve the directory containing `path` and return it with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("document path should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Ensure the parent directory for `path` exists.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Return whether `path` exists and is a regular file.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Split a parent path into an ambient base directory and a relative suffix
/// that `cap-std` can resolve beneath it.
pub fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();
    let (base, relative) = match std_parent.components().next() {
        // Windows drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR_STR);
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (base, relative)
        }
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR);
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;
    Ok((dir, relative))
}
