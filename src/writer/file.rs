// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only file writers.
//!
//! Several loggers may point at the same daily file. Every writer bound to one path shares a
//! single handle behind a single mutex, so whole lines from different threads never
//! interleave. The handle is closed when the last writer for that path is dropped.

use crate::error::{LogError, WriteFailure};
use crate::writer::{Rendering, Writer};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, Weak};

#[derive(Debug)]
struct SharedFile {
    path: PathBuf,
    file: Mutex<File>,
}

static OPEN_FILES: OnceLock<Mutex<HashMap<PathBuf, Weak<SharedFile>>>> = OnceLock::new();

fn open_shared(path: &Path) -> Result<Arc<SharedFile>, LogError> {
    let bind_error = |source| LogError::FileBind {
        path: path.to_path_buf(),
        source,
    };
    if path.is_dir() {
        return Err(bind_error(io::Error::other("path is a directory")));
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(bind_error)?;
    let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    let mut table = OPEN_FILES
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    table.retain(|_, shared| shared.strong_count() > 0);
    if let Some(existing) = table.get(&key).and_then(Weak::upgrade) {
        // `file` is dropped here; everyone appends through the existing handle
        return Ok(existing);
    }
    let shared = Arc::new(SharedFile {
        path: key.clone(),
        file: Mutex::new(file),
    });
    table.insert(key, Arc::downgrade(&shared));
    Ok(shared)
}

impl SharedFile {
    fn append(&self, line: &str) -> Result<(), WriteFailure> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        let mut file = self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_all(buf.as_bytes())?;
        Ok(())
    }

    fn flush(&self) {
        let mut file = self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = file.flush();
    }
}

/// Appends plain-text lines to a file.
#[derive(Debug, Clone)]
pub struct FileWriter {
    shared: Arc<SharedFile>,
}

impl FileWriter {
    /// Opens (creating if needed) `path` for appending.
    ///
    /// Fails with [`LogError::FileBind`] when `path` is a directory or cannot be opened.
    pub fn bind(path: impl AsRef<Path>) -> Result<Self, LogError> {
        Ok(Self {
            shared: open_shared(path.as_ref())?,
        })
    }

    /// The canonical path this writer appends to.
    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    /// Whether `self` and `other` append through the same handle.
    pub fn shares_handle_with(&self, other: &FileWriter) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Writer for FileWriter {
    fn write(&self, line: &str) -> Result<(), WriteFailure> {
        self.shared.append(line)
    }

    fn rendering(&self) -> Rendering {
        Rendering::Plain
    }

    fn prepare_to_die(&self) {
        self.shared.flush();
    }
}

/// Appends one JSON object per line to a file.
#[derive(Debug, Clone)]
pub struct JsonFileWriter {
    shared: Arc<SharedFile>,
}

impl JsonFileWriter {
    pub fn bind(path: impl AsRef<Path>) -> Result<Self, LogError> {
        Ok(Self {
            shared: open_shared(path.as_ref())?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.shared.path
    }
}

impl Writer for JsonFileWriter {
    fn write(&self, line: &str) -> Result<(), WriteFailure> {
        self.shared.append(line)
    }

    fn rendering(&self) -> Rendering {
        Rendering::Structured
    }

    fn prepare_to_die(&self) {
        self.shared.flush();
    }
}
