//! On-disk store: one JSON file per key inside a data directory.
//!
//! Readers take a shared lock and writers an exclusive one, so two hosts
//! pointed at the same directory never interleave a write with a read.

use fs2::FileExt;
use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use super::{Store, StoreError};

/// Store backed by `<dir>/<key>.json` files.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        let mut file = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        file.lock_shared()?;
        let mut text = String::new();
        let result = file.read_to_string(&mut text);
        file.unlock()?;
        result?;

        // Interrupted writers can leave NUL padding behind.
        let cleaned = text.trim_start_matches('\0');
        if cleaned.trim().is_empty() {
            log::debug!("store: {} is empty, treating as absent", path.display());
            return Ok(None);
        }
        Ok(Some(cleaned.to_string()))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)?;

        file.lock_exclusive()?;
        let result = replace_contents(&mut file, value);
        file.unlock()?;
        result?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn replace_contents(file: &mut fs::File, value: &str) -> std::io::Result<()> {
    file.set_len(0)?;
    file.write_all(value.as_bytes())?;
    file.flush()?;
    file.sync_all()
}
