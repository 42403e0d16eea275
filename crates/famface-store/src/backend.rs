//! Key-value blob storage for the persisted state document.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, trace};

use famface_core::defaults::STATE_FILE_EXTENSION;
use famface_core::{Error, Result};

/// Storage for opaque string blobs under string keys.
///
/// Reads of a key that was never written return `Ok(None)`.
pub trait StateBackend: Send + Sync {
    /// Fetch the blob stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value.
    fn write(&self, key: &str, blob: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Use `dir` for storage, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened file backend");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(Error::InvalidInput(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.{}", key, STATE_FILE_EXTENSION)))
    }
}

impl StateBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(blob) => {
                trace!(path = %path.display(), blob_len = blob.len(), "Read state blob");
                Ok(Some(blob))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        let path = self.path_for(key)?;
        // Write beside the target then rename so readers never see a
        // partially written document.
        let tmp = path.with_extension(format!("{}.tmp", STATE_FILE_EXTENSION));
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &path)?;
        trace!(path = %path.display(), blob_len = blob.len(), "Wrote state blob");
        Ok(())
    }
}

/// In-process storage, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with one blob.
    pub fn with_blob(key: impl Into<String>, blob: impl Into<String>) -> Self {
        let backend = Self::new();
        if let Ok(mut blobs) = backend.blobs.lock() {
            blobs.insert(key.into(), blob.into());
        }
        backend
    }
}

impl StateBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| Error::Storage("memory backend lock poisoned".to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| Error::Storage("memory backend lock poisoned".to_string()))?;
        blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

impl<B: StateBackend + ?Sized> StateBackend for std::sync::Arc<B> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        (**self).write(key, blob)
    }
}
