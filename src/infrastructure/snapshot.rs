//! Original-content snapshots

use crate::domain::PostId;
use crate::error::Result;
use crate::infrastructure::repository::write_atomic;
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value store holding at most one pre-modification body per post
pub trait SnapshotStore {
    /// Insert or replace the snapshot of a post
    fn upsert(&mut self, id: PostId, content: &str) -> Result<()>;

    /// Snapshot of a post, if any
    fn get(&self, id: PostId) -> Result<Option<String>>;

    /// Remove the snapshot of a post. Missing snapshots are not an error.
    fn delete(&mut self, id: PostId) -> Result<()>;

    fn contains(&self, id: PostId) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }
}

/// Snapshots stored as one file per post: `<dir>/<post id>.html`
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: PathBuf) -> Self {
        FileSnapshotStore { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: PostId) -> PathBuf {
        self.dir.join(format!("{}.html", id))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn upsert(&mut self, id: PostId, content: &str) -> Result<()> {
        write_atomic(&self.path_for(id), content)
    }

    fn get(&self, id: PostId) -> Result<Option<String>> {
        let path = self.path_for(id);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&mut self, id: PostId) -> Result<()> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
