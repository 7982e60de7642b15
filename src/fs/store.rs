//! File access collaborator
//!
//! The workflow core only touches the file system through [`FileSystem`],
//! so hosts and tests can supply their own storage.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Minimal file operations needed by the workflow core
pub trait FileSystem: Send + Sync {
    /// Read a whole file. Missing files yield `ErrorKind::NotFound`.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the contents of a file, creating it if needed
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Whether a file exists at `path`
    fn exists(&self, path: &Path) -> bool;
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// [`FileSystem`] backed by the local disk.
///
/// Writes go to a hidden temp file next to the destination which is then
/// renamed over it, so readers see either the old or the new contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        LocalFileSystem
    }

    fn temp_path_for(path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("stepwise");
        let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp_name = format!(".{}.{}.{}.tmp", file_name, process::id(), seq);
        match path.parent() {
            Some(parent) => parent.join(temp_name),
            None => PathBuf::from(temp_name),
        }
    }
}

impl FileSystem for LocalFileSystem {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = Self::temp_path_for(path);
        let result = (|| {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(contents)?;
            file.sync_all()?;
            drop(file);
            fs::rename(&temp_path, path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    failing: BTreeSet<PathBuf>,
    writes: usize,
}

/// In-memory [`FileSystem`] for tests and embedding.
///
/// Counts successful writes and can be told to fail writes to given paths.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    inner: Mutex<MemoryInner>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed a file without counting it as a write
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.lock().files.insert(path.into(), contents.into());
    }

    /// Contents of a file as UTF-8, if present
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.lock()
            .files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Make every future write to `path` fail
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.lock().failing.insert(path.into());
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.lock().files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut inner = self.lock();
        if inner.failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write to {} rejected", path.display()),
            ));
        }
        inner.files.insert(path.to_path_buf(), contents.to_vec());
        inner.writes += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().files.contains_key(path)
    }
}
