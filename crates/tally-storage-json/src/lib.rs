//! Filesystem-backed key-value persistence for the ledger engine.
//!
//! Each logical key becomes one JSON document in the data directory.
//! Writes go through a temp file and rename so a crash mid-write leaves
//! the previous document intact.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tally_core::{CoreError, StateStore};

const STORE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Durable store rooted at a data directory, one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store, creating the directory when missing.
    pub fn new(dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, STORE_EXTENSION))
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
