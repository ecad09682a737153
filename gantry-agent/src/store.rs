//! Handle store
//!
//! Durable persistence for job handles: one JSON file per handle under a
//! root directory. A poller that crashed mid-job reloads its handles from
//! here and resumes polling where it left off.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use gantry_core::domain::job::{JobHandle, RemoteRef};

/// Filesystem-backed store of serialized job handles
pub struct HandleStore {
    root: PathBuf,
}

impl HandleStore {
    /// Opens a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("failed to create handle store at {}", root.display()))?;
        Ok(Self { root })
    }

    fn path_for(&self, remote: &RemoteRef) -> PathBuf {
        self.root.join(format!("{remote}.json"))
    }

    /// Persists a handle, replacing any previous record for the same job
    pub fn save(&self, handle: &JobHandle) -> Result<()> {
        let bytes = handle.encode().context("failed to serialize handle")?;
        let path = self.path_for(&handle.remote);
        fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Loads the handle for a remote job, if one is stored
    pub fn load(&self, remote: &RemoteRef) -> Result<Option<JobHandle>> {
        let path = self.path_for(remote);
        if !path.exists() {
            return Ok(None);
        }

        let bytes =
            fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let handle = JobHandle::decode(&bytes)
            .with_context(|| format!("corrupt handle record at {}", path.display()))?;

        Ok(Some(handle))
    }

    /// Removes the record for a remote job; no-op when absent
    pub fn remove(&self, remote: &RemoteRef) -> Result<()> {
        let path = self.path_for(remote);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to remove {}", path.display()))
            }
        }
    }

    /// Loads every stored handle
    pub fn list(&self) -> Result<Vec<JobHandle>> {
        let mut handles = Vec::new();

        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to read {}", self.root.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let bytes =
                fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
            let handle = JobHandle::decode(&bytes)
                .with_context(|| format!("corrupt handle record at {}", path.display()))?;
            handles.push(handle);
        }

        Ok(handles)
    }
}
